//! Runs a whole render: find the good points, sample on a fixed pool
//! of worker threads while the calling thread draws the progress bar,
//! then merge the workers' counters.

use boundary::find_good_points;
use config::Config;
use crossbeam;
use error::Result;
use histogram::{self, Histogram};
use num::Complex;
use num_cpus;
use planes::PlaneMapper;
use progress::{monitor, Progress, POLL_INTERVAL};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sampler::Sampler;
use std::io::Write;
use std::panic;

/// The Renderer owns a validated configuration and the plane it
/// renders onto.  Once built it is not mutated.
#[derive(Debug)]
pub struct Renderer {
    config: Config,
    plane: PlaneMapper,
}

impl Renderer {
    /// Validates `config` and sets up the `[-2, 2]` window at the
    /// configured resolution.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let plane = PlaneMapper::buddhabrot(config.size)?;
        Ok(Renderer { config, plane })
    }

    /// The configuration this renderer was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The pixel/complex mapping shared by every phase.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    // Seeded runs give the mask stream `seed` and worker `i` the
    // stream `seed + 1 + i`; unseeded runs draw every stream from the
    // operating system.
    fn rng(&self, stream: u64) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
            None => StdRng::from_entropy(),
        }
    }

    /// Locates the boundary band the biased sampler draws around.
    pub fn good_points(&self) -> Vec<Complex<f64>> {
        let mut rng = self.rng(0);
        find_good_points(
            &self.plane,
            self.config.mask_iterations,
            self.config.dilations,
            &mut rng,
        )
    }

    /// Runs every worker's full budget and returns the merged counts.
    /// The progress bar is drawn on `out`; pass `io::sink()` to run
    /// silently.
    pub fn sample<W: Write>(&self, good_points: &[Complex<f64>], out: &mut W) -> Result<Histogram> {
        let threads = self.config.threads;
        let points = self.config.points;
        let sampler = Sampler::new(
            &self.plane,
            self.config.iterations,
            self.config.p_uniform,
            good_points,
            self.config.point_radius(),
        )?;

        if threads > num_cpus::get() {
            warn!(
                "{} workers requested on {} cores",
                threads,
                num_cpus::get()
            );
        }
        info!(
            "Sampling Buddhabrot data: {} workers x {} points",
            threads, points
        );

        let progress = Progress::new(threads, points);
        let mut allocation = histogram::arena(self.config.size, threads);
        let shown = {
            let regions: Vec<&mut [u64]> = allocation.chunks_mut(self.plane.len()).collect();
            let sampler = &sampler;
            let progress = &progress;
            crossbeam::scope(|spawner| {
                for (i, region) in regions.into_iter().enumerate() {
                    let mut rng = self.rng(1 + i as u64);
                    let running = progress.running();
                    spawner.spawn(move |_| {
                        let _running = running;
                        debug!("worker {} started", i);
                        sampler.sample(points, &mut rng, region, progress.counter(i));
                        debug!("worker {} finished", i);
                    });
                }
                monitor(progress, out, POLL_INTERVAL)
            })
            .unwrap_or_else(|err| panic::resume_unwind(err))
        };
        if let Err(err) = shown {
            warn!("progress display failed: {}", err);
        }

        info!("Merging thread results");
        Ok(histogram::merge(self.config.size, &allocation))
    }

    /// Both phases, back to back.
    pub fn render<W: Write>(&self, out: &mut W) -> Result<Histogram> {
        let good_points = self.good_points();
        self.sample(&good_points, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn small(threads: usize, seed: u64) -> Config {
        Config {
            size: 32,
            mask_iterations: 50,
            dilations: 1,
            iterations: 30,
            threads,
            points: 2000,
            p_uniform: 0.5,
            point_radius: None,
            seed: Some(seed),
            ..Config::default()
        }
    }

    #[test]
    fn invalid_configs_do_no_work() {
        let config = Config {
            threads: 0,
            ..small(1, 0)
        };
        assert!(Renderer::new(config).is_err());
    }

    #[test]
    fn seeded_renders_repeat() {
        let a = Renderer::new(small(3, 42)).unwrap().render(&mut io::sink()).unwrap();
        let b = Renderer::new(small(3, 42)).unwrap().render(&mut io::sink()).unwrap();
        assert_eq!(a, b);
        assert!(a.total() > 0);
    }

    #[test]
    fn different_seeds_differ() {
        let a = Renderer::new(small(2, 1)).unwrap().render(&mut io::sink()).unwrap();
        let b = Renderer::new(small(2, 2)).unwrap().render(&mut io::sink()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn workers_get_distinct_streams() {
        // Two workers with identical streams would produce a merged
        // histogram with every count even.
        let config = Config {
            p_uniform: 1.0,
            ..small(2, 9)
        };
        let renderer = Renderer::new(config).unwrap();
        let h = renderer.sample(&[], &mut io::sink()).unwrap();
        assert!(h.counts().iter().any(|c| c % 2 != 0));
    }

    #[test]
    fn merged_histogram_is_mirror_symmetric() {
        let renderer = Renderer::new(small(4, 5)).unwrap();
        let h = renderer.render(&mut io::sink()).unwrap();
        for y in 0..32 {
            for x in 0..32 {
                assert_eq!(h.get(x, y), h.get(x, 31 - y));
            }
        }
    }

    #[test]
    fn progress_bar_reaches_the_end() {
        let renderer = Renderer::new(small(2, 3)).unwrap();
        let mut out = Vec::new();
        renderer.sample(&[], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("100.0%"));
    }
}
