//! Shared fixtures: a file-backed service in a temp dir, seeded with a few patients.

use patient_records::{JsonFileStore, NewPatient, PatientService};
use serde_json::json;
use tempfile::TempDir;

pub struct Fixture {
    // kept alive for the store's lifetime
    _dir: TempDir,
    pub service: PatientService<JsonFileStore>,
}

pub fn empty() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("patients.json"));
    store.create_if_missing().unwrap();
    Fixture {
        _dir: dir,
        service: PatientService::new(store),
    }
}

/// Three patients with heights A 1.5, B 1.8, C 1.6.
pub fn seeded() -> Fixture {
    let fixture = empty();
    fixture.service.create(patient("A", "Asha", 1.5, 50.0)).unwrap();
    fixture.service.create(patient("B", "Bilal", 1.8, 95.0)).unwrap();
    fixture.service.create(patient("C", "Chitra", 1.6, 62.0)).unwrap();
    fixture
}

pub fn patient(id: &str, name: &str, height: f64, weight: f64) -> NewPatient {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "city": "Hyderabad",
        "age": 41,
        "gender": "other",
        "height": height,
        "weight": weight
    }))
    .unwrap()
}
