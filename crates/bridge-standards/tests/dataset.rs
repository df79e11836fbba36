use bridge_model::{IcfComponent, KsiTarget};
use bridge_standards::hash::Fingerprint;
use bridge_standards::{DatasetSource, ReferenceDataset, reference_root};

fn builtin() -> ReferenceDataset {
    ReferenceDataset::builtin().expect("load builtin dataset")
}

#[test]
fn builtin_dataset_loads_every_table() {
    let dataset = builtin();
    assert_eq!(dataset.source(), &DatasetSource::Builtin);
    assert_eq!(dataset.icf_entries().len(), 44);
    assert_eq!(dataset.ksi_targets().len(), 43);
    assert_eq!(dataset.bbic_mappings().len(), 13);
    assert_eq!(dataset.ibic_mappings().len(), 6);
    assert_eq!(dataset.kva_mappings().len(), 7);
    assert_eq!(dataset.shanarri_domains().len(), 8);
    assert_eq!(dataset.core_sets().len(), 5);
    assert_eq!(dataset.patterns().len(), 9);
    assert_eq!(dataset.keywords().len(), 62);
    assert_eq!(dataset.contexts().len(), 3);
    assert_eq!(dataset.manifest().pins.icf, "2025");
}

#[test]
fn builtin_matches_workspace_directory() {
    let from_disk = ReferenceDataset::load(&reference_root()).expect("load reference dir");
    assert_eq!(from_disk.fingerprint(), builtin().fingerprint());
    assert_eq!(from_disk.fingerprint().len(), 64);
}

#[test]
fn fingerprint_covers_manifest_tables_in_order() {
    let root = reference_root();
    let dataset = ReferenceDataset::load(&root).expect("load reference dir");
    let mut expected = Fingerprint::new();
    for file in &dataset.manifest().files {
        let contents = std::fs::read_to_string(root.join(&file.path)).expect("read table");
        expected.add_table(&file.path, &contents);
    }
    assert_eq!(dataset.fingerprint(), expected.finish());
}

#[test]
fn icf_lookup_and_hierarchy() {
    let dataset = builtin();
    let d160 = dataset.icf_entry("d160").expect("d160");
    assert_eq!(d160.name, "Att fokusera uppmärksamhet");
    assert_eq!(d160.component, IcfComponent::ActivitiesParticipation);
    assert_eq!(d160.parent_code.as_deref(), Some("d1"));
    assert_eq!(d160.level, 2);
    assert_eq!(dataset.icf_entry("b1400").map(|e| e.level), Some(3));
    assert!(dataset.icf_entry("b1").is_some_and(|e| e.is_chapter()));
    assert_eq!(dataset.icf_name("x999"), None);
}

#[test]
fn reverse_ksi_index_uses_table_order() {
    let dataset = builtin();
    assert_eq!(
        dataset.ksi_targets_for_icf("d160"),
        &[KsiTarget::SC2, KsiTarget::SCA]
    );
    assert_eq!(dataset.ksi_targets_for_icf("b152"), &[KsiTarget::SAT]);
    assert!(dataset.ksi_targets_for_icf("b140").is_empty());
    assert_eq!(dataset.ksi_target_name(KsiTarget::SC2), "SC2");
    assert_eq!(
        dataset.ksi_target_name(KsiTarget::SCA),
        "Att fokusera uppmärksamhet"
    );
}

#[test]
fn mapping_tables_are_reachable_by_icf_code() {
    let dataset = builtin();
    assert_eq!(
        dataset.bbic_for("d160").map(|m| m.dimension.as_str()),
        Some("Barnets utveckling")
    );
    assert_eq!(
        dataset.ibic_for("d710").map(|m| m.subarea.as_str()),
        Some("Social interaktion")
    );
    let kva: Vec<_> = dataset
        .kva_for("d140")
        .into_iter()
        .map(|m| m.kva_code.as_str())
        .collect();
    assert_eq!(kva, vec!["DV015", "DV017"]);
    assert!(dataset.kva_for("e250").is_empty());
}

#[test]
fn analyzer_rules_group_targets() {
    let dataset = builtin();
    let first = &dataset.patterns()[0];
    assert_eq!(first.trigger, "svårt att (koncentrera|fokusera)");
    assert_eq!(first.targets.len(), 2);
    let stress = dataset
        .keywords()
        .iter()
        .find(|k| k.trigger == "stressad")
        .expect("stressad keyword");
    let codes: Vec<_> = stress.targets.iter().map(|t| t.icf_code.as_str()).collect();
    assert_eq!(codes, vec!["b152", "d240"]);
    assert!(dataset.context_prefixes("trygghet").contains(&"e250".to_string()));
    assert!(dataset.context_prefixes("okänd").is_empty());
}

#[test]
fn unresolved_references_are_informational() {
    let dataset = builtin();
    assert!(!dataset.issues().is_empty());
    assert!(
        dataset
            .issues()
            .iter()
            .all(|i| i.severity == bridge_standards::IssueSeverity::Info)
    );
}
