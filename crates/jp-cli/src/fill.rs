//! `jetperf fill`: JSON-lines jet records → histogram tree.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::io::BufRead;
use std::path::Path;

use jp_core::{Error, Jet, JetRecord};
use jp_hist::{BinningConfig, Group, JetPerfHists};

/// Jets per worker histogram set.
const CHUNK_SIZE: usize = 16_384;

/// Jets resolved from the input, plus records skipped for an unknown label.
struct Input {
    jets: Vec<(Jet, f64)>,
    skipped: usize,
}

pub fn cmd_fill(
    input: &Path,
    output: &Path,
    config: Option<&Path>,
    threads: usize,
    skip_unknown: bool,
) -> Result<()> {
    if threads > 0 {
        // Best-effort; if a global pool already exists, keep going.
        let _ = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global();
    }

    let cfg = match config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading binning config");
            BinningConfig::from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => BinningConfig::default(),
    };

    tracing::info!(path = %input.display(), "reading jets");
    let Input { jets, skipped } = read_jets(input, skip_unknown)?;
    tracing::info!(n_jets = jets.len(), "jets read");

    let hists = fill_parallel(&cfg, &jets)?;

    let misses = hists.pt_misses();
    if misses > 0 || skipped > 0 {
        tracing::warn!(
            pt_misses = misses,
            unknown_flavor = skipped,
            "some jets were not fully binned"
        );
    }

    let mut root = Group::new();
    hists.write_to(&mut root).context("failed to build histogram tree")?;
    root.write_json(output).with_context(|| format!("failed to write {}", output.display()))?;

    eprintln!(
        "Filled {} jets{} → {}",
        jets.len(),
        if skipped > 0 { format!(" ({skipped} skipped)") } else { String::new() },
        output.display(),
    );
    Ok(())
}

fn read_jets(path: &Path, skip_unknown: bool) -> Result<Input> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open input {}", path.display()))?;
    let mut jets = Vec::new();
    let mut skipped = 0;

    for (i, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: JetRecord = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid jet record", path.display(), i + 1))?;
        match record.to_jet() {
            Ok(jet) => jets.push((jet, record.weight())),
            Err(Error::UnknownFlavor(msg)) if skip_unknown => {
                tracing::debug!(line = i + 1, "skipping jet: unknown flavor {msg}");
                skipped += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("{}:{}", path.display(), i + 1));
            }
        }
    }

    Ok(Input { jets, skipped })
}

/// Fill one histogram set per chunk on the rayon pool, then merge in chunk order.
fn fill_parallel(cfg: &BinningConfig, jets: &[(Jet, f64)]) -> Result<JetPerfHists> {
    let partials = jets
        .par_chunks(CHUNK_SIZE)
        .map(|chunk| -> jp_core::Result<JetPerfHists> {
            let mut hists = JetPerfHists::new(cfg)?;
            for (jet, weight) in chunk {
                hists.fill(jet, *weight);
            }
            Ok(hists)
        })
        .collect::<jp_core::Result<Vec<_>>>()?;

    let mut total = JetPerfHists::new(cfg)?;
    for partial in &partials {
        total.merge(partial)?;
    }
    Ok(total)
}
