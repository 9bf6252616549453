use crate::pulse::PulseError;

/// Errors surfaced by a smartvol run
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A sink input pattern failed to compile
    #[error("invalid sink input pattern {pattern:?}: {source}")]
    Pattern {
        /// The offending pattern as given on the command line
        pattern: String,
        /// Compilation failure reported by the regex engine
        #[source]
        source: regex::Error,
    },

    /// PulseAudio communication failed
    #[error(transparent)]
    Pulse(#[from] PulseError),
}
