//! Built-in example sequences offered next to the sequence input.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleSequence {
    pub label: &'static str,
    pub sequence: &'static str,
}

pub const EXAMPLE_SEQUENCES: &[ExampleSequence] = &[
    ExampleSequence {
        label: "Melittin",
        sequence: "GIGAVLKVLTTGLPALISWIKRKRQQ",
    },
    ExampleSequence {
        label: "Chlorotoxin",
        sequence: "MCMPCFTTDHQMARKCDDCCGGKGRGKCYGPQCLCR",
    },
    ExampleSequence {
        label: "Alpha-bungarotoxin",
        sequence: "IVCHTTATSPISAVTCPPGENLCYRKMWCDAFCSSRGKVVELGCAATCPSKKPYEEVTCCSTDKCNPHPKQRPG",
    },
    ExampleSequence {
        label: "Apamin",
        sequence: "CNCKAPETALCARRCQQH",
    },
];

pub fn find_example(label: &str) -> Option<(usize, &'static ExampleSequence)> {
    EXAMPLE_SEQUENCES
        .iter()
        .enumerate()
        .find(|(_, example)| example.label.eq_ignore_ascii_case(label.trim()))
}
