// src/bin/perf_parse.rs
// Parse many generated expressions in parallel against one shared table set.
//
//   PERF_PARSE_COUNT  number of expressions (default 10000)
//   PERF_PARSE_LEN    minimum bytes per expression (default 200)
//   PERF_PARSE_SEED   base seed (default 42)
//   PERF_PARSE_MODE   hints | fullast | noast (default hints)

use std::time::Instant;

use anyhow::{Result, bail};
use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use tablerun::{
    ast::AstMode,
    config::{env_u64, env_usize},
    dev::generator::gen_valid_source,
    grammars::Grammar,
};

fn fmt_mib(bytes: u64) -> String {
    let mib = (bytes as f64) / (1024.0 * 1024.0);
    format!("{mib:.2} MiB")
}

fn throughput_mibs(bytes: u64, ms: f64) -> f64 {
    if ms <= 0.0 {
        return 0.0;
    }
    (bytes as f64) / (1024.0 * 1024.0) / (ms / 1_000.0)
}

fn main() -> Result<()> {
    let count = env_usize("PERF_PARSE_COUNT", 10_000);
    let target_len = env_usize("PERF_PARSE_LEN", 200);
    let seed = env_u64("PERF_PARSE_SEED", 42);
    let mode: AstMode = std::env::var("PERF_PARSE_MODE")
        .unwrap_or_default()
        .parse()?;

    let grammar = Grammar::load("pemdas")?;

    let gen_t0 = Instant::now();
    let inputs: Vec<String> = (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            gen_valid_source(&mut rng, target_len)
        })
        .collect();
    let gen_ms = gen_t0.elapsed().as_secs_f64() * 1e3;
    let bytes: u64 = inputs.iter().map(|s| s.len() as u64).sum();
    println!(
        "Input: {count} generated expressions ({} | {bytes} bytes) [seed={seed}]",
        fmt_mib(bytes)
    );
    println!("Gen:   {gen_ms:.3} ms");

    let t0 = Instant::now();
    let results: Vec<Result<usize, String>> = inputs
        .par_iter()
        .map(|src| match grammar.parse(src, mode) {
            Ok(ast) => Ok(ast.map_or(0, |a| a.root.count_nodes())),
            Err(e) => Err(e.to_string()),
        })
        .collect();
    let ms = t0.elapsed().as_secs_f64() * 1e3;

    let nodes: usize = results.iter().filter_map(|r| r.as_ref().ok()).sum();
    let failures: Vec<&String> = results.iter().filter_map(|r| r.as_ref().err()).collect();
    println!(
        "Parse: {ms:.3} ms ({:.2} MiB/s) | threads={} | nodes={nodes} | mode={mode:?}",
        throughput_mibs(bytes, ms),
        rayon::current_num_threads()
    );

    if let Some(first) = failures.first() {
        bail!("{} of {count} parses failed; first: {first}", failures.len());
    }
    Ok(())
}
