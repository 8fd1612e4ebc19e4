use std::time::Instant;

use crate::simulation::coords::Coords;
use crate::simulation::error::MechanicsError;
use crate::simulation::fields::{Field, Gravity};
use crate::simulation::particle::Particle;
use crate::simulation::universe::Universe;

/// Build a universe of `n` unit masses under gravity with G = 0.1
/// Deterministic positions, no rand needed
pub fn make_universe(n: usize) -> Result<Universe, MechanicsError> {
    let fields: Vec<Box<dyn Field>> = vec![Box::new(Gravity::new(0.1))];
    let mut universe = Universe::new(fields).with_tick_length(0.001)?;

    for i in 0..n {
        let i_f = i as f64;
        let x = Coords::new(
            (i_f * 0.37).sin() * 5.0,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
        );
        universe.add_particle(Particle::new(1.0)?.with_position(x));
    }
    Ok(universe)
}

/// Time the gravity pass alone against a full tick for growing n
pub fn bench_gravity() -> Result<(), MechanicsError> {
    let ns = [50, 100, 200, 400, 800];
    let gravity = Gravity::new(0.1);

    for n in ns {
        let mut universe = make_universe(n)?;
        let mut particles = universe.particles().to_vec();

        // Warm up
        gravity.apply(0, &mut particles)?;

        let t0 = Instant::now();
        gravity.apply(0, &mut particles)?;
        let dt_field = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        universe.tick()?;
        let dt_tick = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, gravity pass = {:8.6} s, full tick = {:8.6} s", dt_field, dt_tick);
    }
    Ok(())
}

/// Per-tick cost for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_tick_curve() -> Result<(), MechanicsError> {
    println!("N,tick_ms");

    for n in (50..=1000).step_by(50) {
        // Small n: average over a few ticks to smooth noise
        let ticks = if n <= 300 { 5 } else { 1 };
        let mut universe = make_universe(n)?;

        let t0 = Instant::now();
        universe.advance(ticks)?;
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / ticks as f64;

        println!("{},{:.6}", n, ms);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benchmark_universe_is_well_formed() {
        let mut u = make_universe(20).unwrap();
        assert_eq!(u.particles().len(), 20);
        u.advance(2).unwrap();
        assert_eq!(u.steps(), 2);
    }
}
