//! Tournament error taxonomy
//!
//! Only `InsufficientEquipment` stops a tournament that could otherwise
//! run. Shoe and racket shortfalls after the start are logged, not raised.

use crate::engine::Phase;

#[derive(Debug, thiserror::Error)]
pub enum TournamentError {
    #[error("tournament cancelled - insufficient rackets ({rackets} available for {competitors} competitors)")]
    InsufficientEquipment { rackets: usize, competitors: usize },

    #[error("registration closed for '{name}': tournament is {phase}")]
    RegistrationClosed { name: String, phase: Phase },

    #[error("no competitors registered")]
    NoCompetitors,

    #[error("tournament already {0}")]
    AlreadyOver(Phase),

    #[error("equipment has not been assigned yet")]
    NotStarted,
}

pub type Result<T> = std::result::Result<T, TournamentError>;
