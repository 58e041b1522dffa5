use thiserror::Error;

/// Errors of the taste kernel.
///
/// Both variants are fatal for the run: there is no partial-completion
/// state to recover, so the CLI layer reports them and exits non-zero.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TasteError {
    /// The fetched listening history has no top tracks or no audio feature
    /// records, leaving the profile baseline undefined.
    #[error("listening history is empty; cannot build a taste profile")]
    EmptyHistory,

    /// The per-artist cap leaves fewer selectable tracks than the requested
    /// playlist size.
    #[error(
        "selection infeasible: wanted {wanted} tracks but only {selectable} are selectable with at most {max_per_artist} per artist"
    )]
    Infeasible {
        wanted: usize,
        selectable: usize,
        max_per_artist: usize,
    },
}
