use bridge_standards::{DoctorReport, ReferenceDataset};

#[test]
fn doctor_report_counts_are_stable() {
    let dataset = ReferenceDataset::builtin().expect("load builtin dataset");
    let report = DoctorReport::from_dataset(&dataset);

    assert_eq!(report.manifest_schema, "semantic-bridge.reference-manifest");
    assert_eq!(report.fingerprint, dataset.fingerprint());
    assert!(report.is_healthy());
    insta::assert_json_snapshot!(report.counts, @r#"
    {
      "files": 10,
      "icf_codes": 44,
      "ksi_targets": 43,
      "bbic_rows": 13,
      "ibic_rows": 6,
      "kva_rows": 7,
      "shanarri_domains": 8,
      "core_sets": 5,
      "patterns": 9,
      "keywords": 62,
      "contexts": 3
    }
    "#);
}

#[test]
fn doctor_report_serializes_source_and_pins() {
    let dataset = ReferenceDataset::builtin().expect("load builtin dataset");
    let json = serde_json::to_value(DoctorReport::from_dataset(&dataset)).expect("serialize");
    assert_eq!(json["source"], "builtin");
    assert_eq!(json["pins"]["kva"], "2026");
    assert_eq!(json["files"].as_array().map(Vec::len), Some(10));
    assert!(
        json["issues"]
            .as_array()
            .is_some_and(|issues| issues.iter().all(|i| i["severity"] == "info"))
    );
}
