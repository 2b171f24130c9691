//! Level play: sessions, boosters and the facade tying them to progression

mod boosters;
mod controller;
mod engine;
mod error;
mod session;

pub use boosters::{BoosterKind, HintReveal, Spent};
pub use controller::{GuessReport, SessionController};
pub use engine::{BoosterQuote, Game};
pub use error::{GameError, InvalidGuess};
pub use session::{GuessBuffer, Keyboard, Session, SessionOutcome, SessionStatus};
