use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ModelError {
    #[error("Domain start ({start}) cannot be after its end ({end})")]
    InvertedDomain { start: usize, end: usize },

    #[error("Protein '{name}' has an empty sequence")]
    EmptySequence { name: String },

    #[error("Protein '{name}' has a non-ASCII sequence")]
    InvalidSequence { name: String },

    #[error(
        "Invalid residue window [{first_res}, {last_res}] for a sequence of length {sequence_len}"
    )]
    InvalidWindow {
        first_res: usize,
        last_res: usize,
        sequence_len: usize,
    },

    #[error("Fragment [{start}, {end}) must have start < end")]
    EmptyFragment { start: usize, end: usize },

    #[error("Fragment [{start}, {end}) lies outside the residue window [{first_res}, {last_res}]")]
    FragmentOutOfBounds {
        start: usize,
        end: usize,
        first_res: usize,
        last_res: usize,
    },

    #[error("Fragment start {start} precedes the previous fragment start {previous_start}")]
    FragmentOutOfOrder { start: usize, previous_start: usize },
}
