use std::fs;

use proteinset_tools::cli::{CollateArgs, ExtractArgs};
use proteinset_tools::commands::{collate, extract};

mod common;

#[test]
fn collate_command_writes_one_fasta_per_role() {
    let dir = tempfile::tempdir().unwrap();
    let org_dir = dir.path().join("Organisms");
    fs::create_dir_all(&org_dir).unwrap();
    common::build_org_dir(&org_dir);

    let input = dir.path().join("roles.tbl");
    fs::write(
        &input,
        "id\tname\nWidgMeth\tWidget methylase\nGadgKin\tGadget kinase\n",
    )
    .unwrap();
    let out_dir = dir.path().join("collated");

    collate::run(CollateArgs {
        out_dir: out_dir.clone(),
        core: org_dir,
        input: Some(input),
        verbose: false,
    })
    .unwrap();

    let widg = common::read_fasta_file(&out_dir.join("WidgMeth.fa"));
    let mut ids: Vec<&str> = widg.iter().map(|(id, _, _)| id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["fig|100.1.peg.1", "fig|200.2.peg.1"]);

    let gadg = common::read_fasta_file(&out_dir.join("GadgKin.fa"));
    assert_eq!(gadg.len(), 1);
    assert_eq!(gadg[0].0, "fig|100.1.peg.2");
    assert_eq!(gadg[0].2, "MPRLLAAAKK");
}

#[test]
fn extract_command_pulls_matching_proteins_from_gtos() {
    let dir = tempfile::tempdir().unwrap();
    let genome_dir = dir.path().join("GTO");
    fs::create_dir_all(&genome_dir).unwrap();
    fs::write(
        genome_dir.join("100.1.gto"),
        r#"{
            "id": "100.1",
            "scientific_name": "Test organism",
            "features": [
                {"id": "fig|100.1.peg.1", "type": "peg",
                 "function": "Widget methylase", "protein_translation": "MSWVAKYLPT"},
                {"id": "fig|100.1.peg.2", "type": "CDS",
                 "function": "Gadget kinase", "protein_translation": "MPRLL"},
                {"id": "fig|100.1.rna.1", "type": "rna", "function": "LSU rRNA"}
            ]
        }"#,
    )
    .unwrap();

    let roles = dir.path().join("roles.tbl");
    fs::write(&roles, "WidgMeth\t1\tWidget methylase\n").unwrap();
    let output = dir.path().join("extracted.faa");

    extract::run(ExtractArgs {
        roles,
        genome_dir,
        output: output.clone(),
        verbose: false,
    })
    .unwrap();

    let records = common::read_fasta_file(&output);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, "fig|100.1.peg.1");
    assert_eq!(records[0].1, "Widget methylase");
    assert_eq!(records[0].2, "MSWVAKYLPT");
}
