use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use mc_core::{Conditions, SimulationState};
use mc_results::{OutputParams, ResultsError, RunRecord, RunRecordStore, apply_retention};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

const CUBE_4: [[i64; 3]; 3] = [[4, 0, 0], [0, 4, 0], [0, 0, 4]];

fn record(temperature: f64, occupation: Vec<u8>) -> RunRecord<Vec<u8>> {
    let conditions = Conditions::new()
        .with_scalar("temperature", temperature)
        .with_vector("param_chem_pot", vec![-1.0]);
    RunRecord::new(CUBE_4, 64, conditions.clone())
        .unwrap()
        .with_initial_state(SimulationState::new(vec![0; occupation.len()], conditions.clone()))
        .with_final_state(SimulationState::new(occupation, conditions))
}

#[test]
fn write_then_read_with_final_states() {
    let dir = unique_temp_dir("mc_results_roundtrip");
    let params = OutputParams {
        write_final_states: true,
        ..OutputParams::default()
    }
    .with_output_dir(&dir);

    let records = vec![record(300.0, vec![1, 0, 1]), record(250.0, vec![1, 1, 1])];
    let store = RunRecordStore::from_params(&params);
    store.write(&records, &params).expect("write failed");
    assert!(dir.join("completed_runs.json").is_file());

    let loaded: Vec<RunRecord<Vec<u8>>> = store.read().expect("read failed").expect("file exists");
    assert_eq!(loaded.len(), 2);
    for (orig, back) in records.iter().zip(&loaded) {
        assert_eq!(back.conditions(), orig.conditions());
        assert_eq!(back.n_unitcells(), 64);
        assert_eq!(back.transformation_matrix_to_supercell(), &CUBE_4);
        assert_eq!(back.final_state(), orig.final_state());
        // not written, so absent rather than defaulted
        assert!(back.initial_state().is_none());
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cleared_states_are_omitted_not_fabricated() {
    let dir = unique_temp_dir("mc_results_cleared");
    let params = OutputParams {
        write_initial_states: true,
        write_final_states: true,
        ..OutputParams::default()
    }
    .with_output_dir(&dir);

    let (prev, last) =
        apply_retention(&params, Some(record(300.0, vec![1])), record(250.0, vec![0]));
    let records = vec![prev.unwrap(), last];

    let store = RunRecordStore::from_params(&params);
    store.write(&records, &params).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path().unwrap()).unwrap()).unwrap();
    let arr = raw.as_array().unwrap();
    // previous run: initial state kept from before it was appended, final state superseded
    assert!(arr[0].get("initial_state").is_some());
    assert!(arr[0].get("final_state").is_none());
    // last run: initial state dropped by policy, final state kept
    assert!(arr[1].get("initial_state").is_none());
    assert_eq!(arr[1]["final_state"]["configuration"], serde_json::json!([0]));
    assert_eq!(arr[1]["conditions"]["temperature"], 250.0);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn write_overwrites_full_history() {
    let dir = unique_temp_dir("mc_results_overwrite");
    let params = OutputParams::default().with_output_dir(&dir);
    let store = RunRecordStore::from_params(&params);

    store.write(&[record(300.0, vec![1])], &params).unwrap();
    store
        .write(&[record(300.0, vec![1]), record(250.0, vec![1])], &params)
        .unwrap();

    let loaded: Vec<RunRecord<Vec<u8>>> = store.read().unwrap().unwrap();
    assert_eq!(loaded.len(), 2);
    // default policy does not write states
    assert!(loaded.iter().all(|r| r.final_state().is_none()));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_file_reports_path() {
    let dir = unique_temp_dir("mc_results_malformed");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("completed_runs.json");
    fs::write(
        &path,
        r#"[{"conditions": {"temperature": 300.0},
             "transformation_matrix_to_supercell": [[1,0,0],[0,1,0],[0,0,1]]}]"#,
    )
    .unwrap();

    let store = RunRecordStore::new(Some(dir.clone()));
    match store.read::<Vec<u8>>() {
        Err(ResultsError::RestartRead { path: p, message }) => {
            assert_eq!(p, path);
            assert!(message.contains("n_unitcells"), "{message}");
        }
        other => panic!("expected RestartRead, got {other:?}"),
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn zero_unitcells_in_file_is_rejected() {
    let dir = unique_temp_dir("mc_results_zero_volume");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("completed_runs.json"),
        r#"[{"conditions": {}, "n_unitcells": 0,
             "transformation_matrix_to_supercell": [[1,0,0],[0,1,0],[0,0,1]]}]"#,
    )
    .unwrap();

    let err = RunRecordStore::new(Some(dir.clone()))
        .read::<Vec<u8>>()
        .unwrap_err();
    assert!(matches!(err, ResultsError::RestartRead { .. }));

    let _ = fs::remove_dir_all(&dir);
}
