//! End-to-end: fill a handful of jets, write the tree, inspect the output.

use approx::assert_relative_eq;
use jp_core::{Error, Flavor, Jet, JetRecord, TagTriple};
use jp_hist::{BinningConfig, DATASET_NAMES, Group, Histogram, JetPerfHists};
use std::time::{SystemTime, UNIX_EPOCH};

fn jet(flavor: Flavor, pt: f64, gaia: (f64, f64, f64), mv1: f64) -> Jet {
    Jet {
        flavor,
        pt,
        gaia: TagTriple::new(gaia.0, gaia.1, gaia.2),
        mv1,
        mv2c00: 0.5,
        mv2c10: 0.5,
        mv2c20: 0.5,
    }
}

fn tmp_path(filename: &str) -> std::path::PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let mut p = std::env::temp_dir();
    p.push(format!("jetperf_test_{}_{}_{}", std::process::id(), nanos, filename));
    p
}

/// Weight in the slot of `hist` holding `x`, read back from the written dataset.
fn written_weight(root: &Group, path: &str, x: f64) -> f64 {
    let ds = root.dataset(path).unwrap_or_else(|| panic!("missing dataset {path}"));
    let n_bins = ds.attribute("n_bins").unwrap() as usize;
    let probe = Histogram::new(n_bins, ds.attribute("x_min").unwrap(), ds.attribute("x_max").unwrap())
        .unwrap();
    let slot = probe.find_slot(x).unwrap();
    ds.values()[slot]
}

#[test]
fn two_jet_scenario() {
    let mut hists = JetPerfHists::new(&BinningConfig::default()).unwrap();
    let a = jet(Flavor::B, 25_000.0, (0.8, 0.1, 0.1), 0.9);
    let b = jet(Flavor::U, 500_000.0, (0.1, 0.1, 0.8), 0.2);
    hists.fill(&a, 1.0);
    hists.fill(&b, 2.0);

    let mut root = Group::new();
    hists.write_to(&mut root).unwrap();

    for path in ["B/btag/all/mv1", "B/btag/ptBins/20-30/mv1"] {
        assert_eq!(written_weight(&root, path, 0.9), 1.0, "{path}");
    }
    for path in ["U/btag/all/mv1", "U/btag/ptBins/200-600/mv1"] {
        assert_eq!(written_weight(&root, path, 0.2), 2.0, "{path}");
    }
    assert_eq!(written_weight(&root, "U/btag/ptBins/600-INF/mv1", 0.2), 0.0);

    let anti_u = jp_core::discriminant::anti_u(&a.gaia);
    assert_relative_eq!(anti_u, 2.0794415416798357, epsilon = 1e-9);
    assert_eq!(written_weight(&root, "B/btag/all/gaiaAntiU", anti_u), 1.0);

    for flavor in ["B", "C", "U", "T"] {
        let all = root.group(&format!("{flavor}/btag/all")).unwrap();
        assert_eq!(all.child_names().collect::<Vec<_>>(), DATASET_NAMES);
        let bins = root.group(&format!("{flavor}/btag/ptBins")).unwrap();
        assert_eq!(bins.child_names().count(), 13);
    }
}

#[test]
fn pt_on_edge_routes_to_lower_bin() {
    let mut hists = JetPerfHists::new(&BinningConfig::default()).unwrap();
    hists.fill(&jet(Flavor::C, 20_000.0, (0.3, 0.3, 0.4), 0.4), 1.0);
    hists.fill(&jet(Flavor::C, 600_000.0, (0.3, 0.3, 0.4), 0.4), 1.0);
    hists.fill(&jet(Flavor::C, 600_001.0, (0.3, 0.3, 0.4), 0.4), 1.0);

    let mut root = Group::new();
    hists.write_to(&mut root).unwrap();
    assert_eq!(written_weight(&root, "C/btag/ptBins/0-20/mv1", 0.4), 1.0);
    assert_eq!(written_weight(&root, "C/btag/ptBins/20-30/mv1", 0.4), 0.0);
    assert_eq!(written_weight(&root, "C/btag/ptBins/200-600/mv1", 0.4), 1.0);
    assert_eq!(written_weight(&root, "C/btag/ptBins/600-INF/mv1", 0.4), 1.0);
}

#[test]
fn weight_is_conserved_across_flavors() {
    let cfg = BinningConfig { n_bins: 50, ..Default::default() };
    let mut hists = JetPerfHists::new(&cfg).unwrap();
    let labels = [5, 4, 0, 15, 7, 5, 0];
    let mut expected = 0.0;
    let mut rejected = 0;
    for (i, &label) in labels.iter().enumerate() {
        let w = 0.25 * (i as f64 + 1.0) - 0.5;
        let record = JetRecord {
            truth_label: label,
            pt: 10_000.0 * (i as f64 + 1.0),
            pb: 0.2 * i as f64,
            pc: 0.3,
            pu: 0.5,
            mv1: 0.1 * i as f64,
            mv2c00: 0.2,
            mv2c10: 0.3,
            mv2c20: 0.4,
            weight: Some(w),
        };
        match hists.fill_record(&record) {
            Ok(()) => expected += w,
            Err(Error::UnknownFlavor(_)) => rejected += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(rejected, 1);

    for name in DATASET_NAMES {
        let total: f64 = Flavor::ALL
            .iter()
            .map(|&f| hists.flavor(f).all().get(name).unwrap().sum_weights())
            .sum();
        assert_relative_eq!(total, expected, epsilon = 1e-12);
    }
}

#[test]
fn repeated_fill_is_linear() {
    let cfg = BinningConfig { n_bins: 100, ..Default::default() };
    let mut twice = JetPerfHists::new(&cfg).unwrap();
    let mut once = JetPerfHists::new(&cfg).unwrap();
    let j = jet(Flavor::T, 75_000.0, (0.25, 0.35, 0.4), 0.33);
    twice.fill(&j, 0.75);
    twice.fill(&j, 0.75);
    once.fill(&j, 1.5);

    for name in DATASET_NAMES {
        let a = twice.flavor(Flavor::T).pt_bin(6).unwrap().get(name).unwrap();
        let b = once.flavor(Flavor::T).pt_bin(6).unwrap().get(name).unwrap();
        assert_eq!(a.contents(), b.contents(), "{name}");
    }
}

#[test]
fn second_write_to_same_location_fails() {
    let hists = JetPerfHists::new(&BinningConfig::default()).unwrap();
    let mut root = Group::new();
    hists.write_to(&mut root).unwrap();
    match hists.write_to(&mut root) {
        Err(Error::DuplicateGroup(path)) => assert_eq!(path, "/B"),
        other => panic!("expected DuplicateGroup, got {other:?}"),
    }

    // A fresh location is fine.
    let mut other = Group::new();
    hists.write_to(other.create_group("run2").unwrap()).unwrap();
    assert!(other.group("run2/T/btag/ptBins/NONE-0").is_some());
}

#[test]
fn merged_workers_match_single_pass() {
    let cfg = BinningConfig { n_bins: 40, ..Default::default() };
    let jets: Vec<_> = (0..40)
        .map(|i| {
            let flavor = Flavor::ALL[i % 4];
            jet(flavor, 5_000.0 * i as f64, (0.2, 0.3, 0.5), (i as f64) / 40.0)
        })
        .collect();

    let mut single = JetPerfHists::new(&cfg).unwrap();
    for j in &jets {
        single.fill(j, 1.0);
    }

    let mut merged = JetPerfHists::new(&cfg).unwrap();
    for chunk in jets.chunks(7) {
        let mut worker = JetPerfHists::new(&cfg).unwrap();
        for j in chunk {
            worker.fill(j, 1.0);
        }
        merged.merge(&worker).unwrap();
    }
    assert_eq!(merged, single);
}

#[test]
fn json_output_has_expected_topology() {
    let mut hists = JetPerfHists::new(&BinningConfig { n_bins: 4, ..Default::default() }).unwrap();
    hists.fill(&jet(Flavor::B, 25_000.0, (0.8, 0.1, 0.1), 0.9), 1.0);
    let mut root = Group::new();
    hists.write_to(&mut root).unwrap();

    let path = tmp_path("hists.json");
    root.write_json(&path).unwrap();
    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let _ = std::fs::remove_file(&path);

    let mv1 = &v["B"]["btag"]["ptBins"]["20-30"]["mv1"];
    let values = mv1["values"].as_array().unwrap();
    assert_eq!(values.len(), 6);
    assert_eq!(values[4].as_f64(), Some(1.0));
    assert_eq!(mv1["attributes"]["x_max"].as_f64(), Some(1.0));
    assert!(v["T"]["btag"]["all"]["gaiaGr1"].is_object());
}
