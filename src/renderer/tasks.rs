use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A single output pixel to be rendered by exactly one worker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PixelTask {
    pub row: usize,
    pub col: usize,
}

/// Every pixel of a `width` x `height` image, row-major.
pub fn generate_tasks(width: usize, height: usize) -> Vec<PixelTask> {
    (0..height)
        .flat_map(|row| (0..width).map(move |col| PixelTask { row, col }))
        .collect()
}

pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Uniform in-place permutation, so that dense regions of the mesh spread evenly over the
/// workers' slices.
pub fn shuffle_tasks(tasks: &mut [PixelTask], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    tasks.shuffle(&mut rng);
}

/// Splits `tasks` into exactly `workers` contiguous slices. Every slice but the last holds
/// `len / workers` tasks; the last one also takes the remainder.
pub fn partition(tasks: &[PixelTask], workers: usize) -> Vec<&[PixelTask]> {
    assert!(workers > 0, "partition needs at least one worker");
    let per_worker = tasks.len() / workers;
    let mut slices = Vec::with_capacity(workers);
    let mut rest = tasks;
    for _ in 0..workers - 1 {
        let (slice, remaining) = rest.split_at(per_worker);
        slices.push(slice);
        rest = remaining;
    }
    slices.push(rest);
    slices
}
