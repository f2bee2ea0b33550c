#[cfg(feature = "bench_partition")]
use cellmap::Diagram;
#[cfg(feature = "bench_partition")]
use std::time::Instant;

#[cfg(not(feature = "bench_partition"))]
fn main() {
    panic!("partition_bench requires --features bench_partition");
}

#[cfg(feature = "bench_partition")]
fn lcg(seed: &mut u64) -> f32 {
    *seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    (((*seed >> 24) & 0xFFFF_FFFF) as u32) as f32 / (u32::MAX as f32)
}

#[cfg(feature = "bench_partition")]
fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut points = 500usize;
    let mut repeats = 20usize;
    for a in &args[1..] {
        if let Some(val) = a.strip_prefix("--points=") {
            if let Ok(v) = val.parse() {
                points = v;
            }
        } else if let Some(val) = a.strip_prefix("--repeats=") {
            if let Ok(v) = val.parse() {
                repeats = v;
            }
        }
    }

    let mut d = Diagram::new();
    let (w, h) = (d.bounds().width, d.bounds().height);
    let mut seed = 0xC0FFEE_u64;
    let t0 = Instant::now();
    for _ in 0..points {
        d.add_point(lcg(&mut seed) * w, lcg(&mut seed) * h);
    }
    let build_ms = t0.elapsed().as_secs_f64() * 1000.0;
    let _ = d.take_commands();

    // Typical interaction: add one point, then remove it again.
    let mut cycle_times: Vec<f64> = Vec::with_capacity(repeats);
    for _ in 0..repeats {
        let t = Instant::now();
        if let Some(id) = d.add_point(lcg(&mut seed) * w, lcg(&mut seed) * h) {
            d.remove_point(id);
        }
        cycle_times.push(t.elapsed().as_secs_f64() * 1000.0);
        let _ = d.take_commands();
    }
    let avg_cycle = if cycle_times.is_empty() {
        0.0
    } else {
        cycle_times.iter().sum::<f64>() / (cycle_times.len() as f64)
    };

    println!(
        "points={} build_ms={:.3} avg_add_remove_ms={:.3}",
        points, build_ms, avg_cycle
    );
}
