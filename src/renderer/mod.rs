mod film;
mod progress;
mod tasks;
mod worker;

pub use film::{Film, Rgb};
pub use progress::{report_progress, DEFAULT_REPORT_INTERVAL};
pub use tasks::{generate_tasks, partition, shuffle_tasks, time_seed, PixelTask};
pub use worker::{render_slice, triangle_color, DEFAULT_BATCH_SIZE};

use crate::camera::Camera;
use crate::error::{Error, OutputError, RenderError};
use crate::parsing::config::RenderSettings;
use crate::parsing::load_mesh;
use crate::profile::Profile;
use crate::world::World;

use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, ScopedJoinHandle};
use std::time::Instant;

use tracing::{debug, info, warn};

pub const BACKGROUND: Rgb = Rgb::BLACK;

/// What a finished render hands back: the image, the combined worker statistics and the final
/// value the progress reporter read from the shared counter.
pub struct RenderOutput {
    pub film: Film,
    pub stats: Profile,
    pub pixels_reported: usize,
}

/// Renders `world` as seen by `camera` with one thread per configured worker, plus one thread
/// reporting progress.
///
/// Pixels are shuffled (unless disabled) and split into one contiguous slice per worker before
/// any thread starts. The resulting image does not depend on the shuffle or the thread count.
pub fn render(
    world: &World,
    camera: &Camera,
    settings: &RenderSettings,
) -> Result<RenderOutput, RenderError> {
    let (width, height) = (camera.width, camera.height);
    let total_pixels = width * height;
    info!("starting render with film resolution {}x{}", width, height);

    let mut tasks = generate_tasks(width, height);
    if settings.shuffle {
        let seed = settings.seed.unwrap_or_else(time_seed);
        info!("shuffling {} pixels with seed {}", total_pixels, seed);
        shuffle_tasks(&mut tasks, seed);
    }
    let slices = partition(&tasks, settings.threads);

    let film = Film::new(width, height, BACKGROUND);
    let progress = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);
    let now = Instant::now();

    let (stats, pixels_reported) = thread::scope(|s| {
        let (film, progress, stop) = (&film, &progress, &stop);

        let show_progress = settings.show_progress;
        let interval = settings.report_interval;
        let reporter = thread::Builder::new()
            .name(String::from("progress"))
            .spawn_scoped(s, move || {
                if show_progress {
                    report_progress(io::stderr(), progress, stop, total_pixels, interval)
                } else {
                    report_progress(io::sink(), progress, stop, total_pixels, interval)
                }
            })
            .map_err(|source| RenderError::Spawn {
                name: String::from("progress"),
                source,
            })?;

        let batch_size = settings.batch_size;
        let mut workers = Vec::with_capacity(slices.len());
        let mut spawn_error = None;
        for (worker_id, &slice) in slices.iter().enumerate() {
            let name = format!("render-{}", worker_id);
            let spawned = thread::Builder::new()
                .name(name.clone())
                .spawn_scoped(s, move || {
                    let profile = render_slice(world, camera, film, slice, progress, batch_size);
                    debug!("worker {} finished {} pixels", worker_id, slice.len());
                    profile
                });
            match spawned {
                Ok(handle) => workers.push((worker_id, handle)),
                Err(source) => {
                    spawn_error = Some(RenderError::Spawn { name, source });
                    break;
                }
            }
        }

        let joined = join_workers(workers);
        let stats = match spawn_error {
            Some(e) => Err(e),
            None => joined,
        };

        // the reporter only exits once this is set, on success and on failure
        stop.store(true, Ordering::Release);
        let reported = reporter.join().map_err(|_| RenderError::ReporterPanicked);
        Ok::<_, RenderError>((stats?, reported?))
    })?;

    let elapsed = (now.elapsed().as_millis() as f32) / 1000.0;
    info!("took {}s", elapsed);
    if pixels_reported != total_pixels {
        warn!(
            "progress counter ended at {} but {} pixels were rendered",
            pixels_reported, total_pixels
        );
    }
    stats.pretty_print(elapsed, settings.threads);

    Ok(RenderOutput {
        film,
        stats,
        pixels_reported,
    })
}

/// Joins every handle before looking at any result. A panicked worker that was joined here no
/// longer makes the enclosing scope panic, so the first panic is reported as an error instead.
fn join_workers(
    workers: Vec<(usize, ScopedJoinHandle<'_, Profile>)>,
) -> Result<Profile, RenderError> {
    let results: Vec<_> = workers
        .into_iter()
        .map(|(worker_id, handle)| {
            handle
                .join()
                .map_err(|_| RenderError::WorkerPanicked(worker_id))
        })
        .collect();
    results
        .into_iter()
        .try_fold(Profile::default(), |acc, profile| {
            profile.map(|profile| acc.combine(profile))
        })
}

/// Full pipeline: load the mesh, render it and write the image.
///
/// Every fatal condition is detected before the output file is created, so on error no image is
/// left behind.
pub fn render_to_file(settings: &RenderSettings) -> Result<Profile, Error> {
    check_output_directory(&settings.output_file)?;

    let mesh = load_mesh(&settings.mesh_file)?;
    info!("Triangle Count: {}", mesh.num_faces());
    let world = World::from_mesh(&mesh);

    let camera = Camera::new(
        settings.resolution.width,
        settings.resolution.height,
        settings.camera.origin,
        settings.camera.focal_offset,
    );

    let output = render(&world, &camera, settings)?;
    output.film.save(&settings.output_file)?;
    Ok(output.stats)
}

fn check_output_directory(output_file: &Path) -> Result<(), OutputError> {
    match output_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
            Err(OutputError::MissingDirectory {
                path: dir.to_path_buf(),
            })
        }
        _ => Ok(()),
    }
}
