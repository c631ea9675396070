use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use pbr::ProgressBar;

pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_millis(200);

/// Polls `progress` every `interval` and draws it as `done / total` with a percentage, until
/// `stop` is raised. The stop flag is checked before the last read of the counter, so once the
/// workers have been joined and `stop` set, the final drawn value is the true total.
///
/// Returns the last value read.
pub fn report_progress<W: Write>(
    out: W,
    progress: &AtomicUsize,
    stop: &AtomicBool,
    total: usize,
    interval: Duration,
) -> usize {
    let mut pb = ProgressBar::on(out, total as u64);
    pb.set_max_refresh_rate(None);
    loop {
        let stopping = stop.load(Ordering::Acquire);
        let done = progress.load(Ordering::Relaxed);
        pb.set(done as u64);
        if stopping {
            pb.finish();
            return done;
        }
        thread::sleep(interval);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::io;

    #[test]
    fn test_returns_immediately_when_already_stopped() {
        let progress = AtomicUsize::new(12);
        let stop = AtomicBool::new(true);
        let last = report_progress(io::sink(), &progress, &stop, 12, Duration::from_secs(60));
        assert_eq!(last, 12);
    }

    #[test]
    fn test_final_read_sees_every_increment() {
        let progress = AtomicUsize::new(0);
        let stop = AtomicBool::new(false);
        let total = 10_000;

        let last = thread::scope(|s| {
            let reporter = s.spawn(|| {
                report_progress(io::sink(), &progress, &stop, total, Duration::from_millis(1))
            });
            let workers: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(|| {
                        for _ in 0..total / 4 {
                            progress.fetch_add(1, Ordering::Relaxed);
                        }
                    })
                })
                .collect();
            for worker in workers {
                worker.join().unwrap();
            }
            stop.store(true, Ordering::Release);
            reporter.join().unwrap()
        });
        assert_eq!(last, total);
    }
}
