use std::collections::HashSet;
use std::fs;

use proteinset_tools::cli::RolesArgs;
use proteinset_tools::commands::roles;
use proteinset_tools::writer::Format;

mod common;

#[test]
fn roles_command_builds_one_labeled_file_per_role() {
    let dir = tempfile::tempdir().unwrap();
    let org_dir = dir.path().join("Organisms");
    fs::create_dir_all(&org_dir).unwrap();
    common::build_org_dir(&org_dir);

    let role_file = dir.path().join("roles.tbl");
    fs::write(
        &role_file,
        "WidgMeth\tWidget methylase (EC 2.1.1.999)\nGadgKin\tGadget kinase\n",
    )
    .unwrap();
    let out_dir = dir.path().join("models");

    roles::run(RolesArgs {
        org_dir: org_dir.clone(),
        out_dir: out_dir.clone(),
        other: 1,
        fix: 0,
        format: Format::Fasta,
        input: Some(role_file),
        verbose: false,
    })
    .unwrap();

    let widg = common::read_fasta_file(&out_dir.join("WidgMeth.fa"));
    let gadg = common::read_fasta_file(&out_dir.join("GadgKin.fa"));

    // two positives (one per genome) plus one counter-example each
    assert_eq!(widg.len(), 4);
    let positives: HashSet<&str> = widg
        .iter()
        .filter(|(_, label, _)| label == "1")
        .map(|(id, _, _)| id.as_str())
        .collect();
    assert_eq!(
        positives,
        HashSet::from(["fig|100.1.peg.1", "fig|200.2.peg.1"])
    );
    for (id, label, _) in &widg {
        assert!(label == "1" || label == "0", "unexpected label on {}", id);
    }
    // counter-examples come from the positive's own genome
    for (id, label, _) in &widg {
        if label == "0" {
            assert!(id.starts_with("fig|100.1.") || id.starts_with("fig|200.2."));
        }
    }

    // one positive, one counter-example
    assert_eq!(gadg.len(), 2);
    assert!(gadg
        .iter()
        .any(|(id, label, _)| id == "fig|100.1.peg.2" && label == "1"));

    // no sequence is used twice across the whole run
    let mut seen = HashSet::new();
    for (id, _, _) in widg.iter().chain(gadg.iter()) {
        assert!(seen.insert(id.clone()), "{} appears twice in the output", id);
    }
}

#[test]
fn roles_command_fixed_width_tab_output() {
    let dir = tempfile::tempdir().unwrap();
    let org_dir = dir.path().join("Organisms");
    fs::create_dir_all(&org_dir).unwrap();
    common::build_org_dir(&org_dir);

    let role_file = dir.path().join("roles.tbl");
    fs::write(&role_file, "GadgKin\tGadget kinase\n").unwrap();
    let out_dir = dir.path().join("models");

    roles::run(RolesArgs {
        org_dir,
        out_dir: out_dir.clone(),
        other: 0,
        fix: 12,
        format: Format::Tab,
        input: Some(role_file),
        verbose: false,
    })
    .unwrap();

    let text = fs::read_to_string(out_dir.join("GadgKin.tbl")).unwrap();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("found\tp1\t"));
    assert_eq!(header.split('\t').count(), 13);
    // the kinase is 10 residues: 10 letters, the end marker, one pad
    let row = lines.next().unwrap();
    assert!(row.starts_with("1.0\tM\tP\tR\t"));
    assert!(row.ends_with("\t*\t-"));
    assert!(lines.next().is_none());
}
