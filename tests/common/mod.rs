use std::fs;
use std::path::Path;

/// Build a two-genome organism directory for the dataset commands.
///
/// Genome 100.1 carries a widget methylase (peg.1), a gadget kinase
/// (peg.2), and three hypothetical proteins; genome 200.2 carries a
/// widget methylase (peg.1) and two hypothetical proteins.
pub fn build_org_dir(root: &Path) {
    let g1 = root.join("100.1");
    fs::create_dir_all(g1.join("Features/peg")).unwrap();
    fs::write(
        g1.join("Features/peg/fasta"),
        concat!(
            ">fig|100.1.peg.1 Widget methylase\nMSWVAKYLPT\n",
            ">fig|100.1.peg.2 Gadget kinase\nMPRLLAAAKK\n",
            ">fig|100.1.peg.3 hypothetical protein\nMPRLL\n",
            ">fig|100.1.peg.4 hypothetical protein\nMPRLLAAA\n",
            ">fig|100.1.peg.5 hypothetical protein\nMPRLLAAAKKYW\n",
        ),
    )
    .unwrap();
    fs::write(
        g1.join("assigned_functions"),
        concat!(
            "fig|100.1.peg.1\tWidget methylase (EC 2.1.1.999)\n",
            "fig|100.1.peg.2\tGadget kinase\n",
            "fig|100.1.peg.3\thypothetical protein\n",
            "fig|100.1.peg.4\thypothetical protein\n",
            "fig|100.1.peg.5\thypothetical protein\n",
        ),
    )
    .unwrap();

    let g2 = root.join("200.2");
    fs::create_dir_all(g2.join("Features/peg")).unwrap();
    fs::write(
        g2.join("Features/peg/fasta"),
        concat!(
            ">fig|200.2.peg.1 Widget methylase\nMKLVVA\n",
            ">fig|200.2.peg.2 hypothetical protein\nMKLV\n",
            ">fig|200.2.peg.3 hypothetical protein\nMKLVVAYW\n",
        ),
    )
    .unwrap();
    fs::write(
        g2.join("assigned_functions"),
        concat!(
            "fig|200.2.peg.1\tWidget methylase\n",
            "fig|200.2.peg.2\thypothetical protein\n",
            "fig|200.2.peg.3\thypothetical protein\n",
        ),
    )
    .unwrap();
}

/// Read a FASTA file back as (id, description, sequence) triples.
pub fn read_fasta_file(path: &Path) -> Vec<(String, String, String)> {
    let reader = bio::io::fasta::Reader::from_file(path).unwrap();
    reader
        .records()
        .map(|record| {
            let record = record.unwrap();
            (
                record.id().to_string(),
                record.desc().unwrap_or("").to_string(),
                String::from_utf8(record.seq().to_vec()).unwrap(),
            )
        })
        .collect()
}
