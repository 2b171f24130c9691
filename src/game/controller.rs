//! Per-level state machine
//!
//! ```text
//! Playing --guess == target--> Won
//! Playing --6th miss---------> Lost --retry--> Playing
//! Playing --skip-------------> Won
//! ```
//!
//! Submitting a guess records it and opens a reveal phase. Until
//! [`SessionController::complete_reveal`] runs, all input is rejected with
//! `SessionNotPlaying`; completing the reveal updates the keyboard and
//! evaluates the transition.

use super::boosters::{self, HintReveal, Spent};
use super::session::{Session, SessionOutcome, SessionStatus};
use super::{GameError, InvalidGuess};
use crate::config::{GameConfig, MAX_ATTEMPTS};
use crate::core::{Feedback, WORD_LENGTH, Word, evaluate};
use crate::wordlists::WordService;
use rand::RngCore;
use tracing::debug;

/// Feedback for a guess plus the transition it caused, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessReport {
    pub feedback: Feedback,
    pub status: SessionStatus,
    pub outcome: Option<SessionOutcome>,
    /// `false` when the finished level is recorded in memory but its save failed
    pub saved: bool,
}

/// Runs one level at a time against a word service
///
/// Holds no coins: paid operations take the current balance and return the
/// new one, leaving the caller to commit it. Use [`Game`](super::Game) to
/// have that done against a saved profile.
pub struct SessionController<'a, W: WordService + ?Sized, R: RngCore> {
    words: &'a W,
    rng: R,
    config: GameConfig,
    session: Option<Session>,
}

impl<'a, W: WordService + ?Sized, R: RngCore> SessionController<'a, W, R> {
    pub fn new(words: &'a W, rng: R, config: GameConfig) -> Self {
        Self {
            words,
            rng,
            config,
            session: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Begin `level` with a freshly drawn target, replacing any current session
    pub fn start(&mut self, level: u32) -> &Session {
        let target = self.words.random_word(&mut self.rng);
        debug!(level, "session started");
        self.session.insert(Session::new(level, target))
    }

    fn active_mut(&mut self) -> Result<&mut Session, GameError> {
        match self.session.as_mut() {
            Some(session) if session.accepts_input() => Ok(session),
            _ => Err(GameError::SessionNotPlaying),
        }
    }

    /// Type one letter into the current row
    ///
    /// Returns `false` when the letter is ignored: not alphabetic, disabled
    /// by a dart, or the row is already full.
    ///
    /// # Errors
    /// `SessionNotPlaying` outside of active play.
    pub fn type_letter(&mut self, letter: char) -> Result<bool, GameError> {
        let session = self.active_mut()?;
        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() || session.disabled_letters.contains(&letter) {
            return Ok(false);
        }
        Ok(session.buffer.push(letter))
    }

    /// Remove the last typed letter; locked letters stay
    ///
    /// # Errors
    /// `SessionNotPlaying` outside of active play.
    pub fn backspace(&mut self) -> Result<Option<char>, GameError> {
        let session = self.active_mut()?;
        Ok(session.buffer.pop(&session.locked_positions))
    }

    /// Submit whatever is in the current row
    ///
    /// # Errors
    /// See [`SessionController::submit_guess`].
    pub fn submit_input(&mut self) -> Result<Feedback, GameError> {
        let text = self.active_mut()?.buffer.text();
        self.submit_guess(&text)
    }

    /// Record a guess and open its reveal phase
    ///
    /// Letters at locked positions are replaced by the target's letters.
    ///
    /// # Errors
    /// `SessionNotPlaying` outside of active play; `InvalidGuess` if the
    /// letters are not a five-letter dictionary word. Nothing changes on error.
    pub fn submit_guess(&mut self, letters: &str) -> Result<Feedback, GameError> {
        let words = self.words;
        let session = self.active_mut()?;

        let mut letters: Vec<char> = letters.trim().chars().collect();
        match letters.len() {
            n if n < WORD_LENGTH => return Err(InvalidGuess::TooShort.into()),
            n if n > WORD_LENGTH => return Err(InvalidGuess::TooLong.into()),
            _ => {}
        }
        for &index in &session.locked_positions {
            letters[index] = session.target.letter_at(index);
        }

        let guess = Word::from_letters(&letters).map_err(|_| InvalidGuess::NotInDictionary)?;
        if !words.is_valid_word(guess.text()) {
            return Err(InvalidGuess::NotInDictionary.into());
        }

        let feedback = evaluate(&guess, &session.target);
        debug!(guess = %guess, feedback = %feedback, row = session.attempts.len(), "guess submitted");
        session.push_attempt(guess, feedback);
        session.revealing = true;
        Ok(feedback)
    }

    /// Finish the reveal of the last guess and apply its consequences
    ///
    /// Returns the outcome when the guess ended the level. Calling this with
    /// no reveal pending does nothing.
    pub fn complete_reveal(&mut self) -> Option<SessionOutcome> {
        let session = self.session.as_mut()?;
        if !session.revealing {
            return None;
        }
        session.revealing = false;

        let (guess, feedback) = match (session.attempts.last(), session.feedback.last()) {
            (Some(guess), Some(feedback)) => (guess.clone(), *feedback),
            _ => return None,
        };
        session.keyboard.record(&guess, &feedback);

        if guess == session.target {
            session.status = SessionStatus::Won;
        } else if session.attempts.len() >= MAX_ATTEMPTS {
            session.status = SessionStatus::Lost;
        } else {
            session.buffer.reset(&session.target, &session.locked_positions);
            return None;
        }

        let outcome = session.outcome();
        debug!(
            level = outcome.level,
            won = outcome.result.won,
            attempts = outcome.result.attempts + 1,
            "session finished"
        );
        Some(outcome)
    }

    /// Submit and immediately complete the reveal
    ///
    /// # Errors
    /// See [`SessionController::submit_guess`].
    pub fn guess(&mut self, letters: &str) -> Result<GuessReport, GameError> {
        let feedback = self.submit_guess(letters)?;
        let outcome = self.complete_reveal();
        let status = self
            .session
            .as_ref()
            .map_or(SessionStatus::Playing, Session::status);
        Ok(GuessReport {
            feedback,
            status,
            outcome,
            saved: true,
        })
    }

    /// # Errors
    /// `SessionNotPlaying` or `InsufficientFunds`; nothing changes on error.
    pub fn use_dart(&mut self, coins: u32) -> Result<Spent<Vec<char>>, GameError> {
        let (cost, count) = (self.config.costs.dart, self.config.dart_letters);
        let session = self
            .session
            .as_mut()
            .filter(|s| s.accepts_input())
            .ok_or(GameError::SessionNotPlaying)?;
        boosters::apply_dart(session, coins, cost, count, &mut self.rng)
    }

    /// # Errors
    /// `SessionNotPlaying`, `InsufficientFunds` or `NoAvailablePosition`;
    /// nothing changes on error.
    pub fn use_hint(&mut self, coins: u32) -> Result<Spent<HintReveal>, GameError> {
        let cost = self.config.costs.hint;
        let session = self
            .session
            .as_mut()
            .filter(|s| s.accepts_input())
            .ok_or(GameError::SessionNotPlaying)?;
        boosters::apply_hint(session, coins, cost, &mut self.rng)
    }

    /// # Errors
    /// `SessionNotPlaying` or `InsufficientFunds`; nothing changes on error.
    pub fn use_skip(&mut self, coins: u32) -> Result<Spent<SessionOutcome>, GameError> {
        let cost = self.config.costs.skip;
        let session = self.active_mut()?;
        boosters::apply_skip(session, coins, cost)
    }

    /// Whether the current session can be retried right now
    ///
    /// # Errors
    /// `SessionNotPlaying` without a session, `SessionNotTerminal` while
    /// playing, `LevelAlreadyWon` after a win.
    pub fn check_retry(&self) -> Result<(), GameError> {
        let session = self.session.as_ref().ok_or(GameError::SessionNotPlaying)?;
        match session.status {
            SessionStatus::Playing => Err(GameError::SessionNotTerminal),
            SessionStatus::Won => Err(GameError::LevelAlreadyWon),
            SessionStatus::Lost => Ok(()),
        }
    }

    /// Replay a lost level with the same target and keyboard knowledge
    ///
    /// The caller has already passed [`SessionController::check_retry`] and
    /// paid for the retry; anything but a lost session is left alone.
    pub(crate) fn restart_lost(&mut self) {
        let Some(session) = self.session.as_mut().filter(|s| s.status == SessionStatus::Lost)
        else {
            return;
        };
        session.attempts.clear();
        session.feedback.clear();
        session.status = SessionStatus::Playing;
        session.buffer.reset(&session.target, &session.locked_positions);
        debug!(level = session.level, "level retried");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::WordList;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const MISSES: [&str; 6] = ["slate", "crane", "audio", "tiger", "lemon", "pizza"];

    fn words() -> WordList {
        WordList::from_slices(
            &["speed"],
            &["erase", "slate", "crane", "audio", "tiger", "lemon", "pizza", "spend"],
        )
        .unwrap()
    }

    fn controller(words: &WordList) -> SessionController<'_, WordList, StdRng> {
        let mut controller = SessionController::new(words, StdRng::seed_from_u64(9), GameConfig::default());
        controller.start(1);
        controller
    }

    fn lose(controller: &mut SessionController<'_, WordList, StdRng>) -> SessionOutcome {
        let mut last = None;
        for miss in MISSES {
            last = controller.guess(miss).unwrap().outcome;
        }
        last.unwrap()
    }

    #[test]
    fn start_creates_fresh_session() {
        let words = words();
        let controller = controller(&words);
        let session = controller.session().unwrap();

        assert_eq!(session.level(), 1);
        assert_eq!(session.target().text(), "SPEED");
        assert_eq!(session.status(), SessionStatus::Playing);
        assert!(session.attempts().is_empty());
        assert!(session.locked_positions().is_empty());
        assert!(session.disabled_letters().is_empty());
    }

    #[test]
    fn operations_without_session_fail() {
        let words = words();
        let mut controller = SessionController::new(&words, StdRng::seed_from_u64(1), GameConfig::default());
        assert!(matches!(controller.submit_guess("speed"), Err(GameError::SessionNotPlaying)));
        assert!(matches!(controller.use_dart(100), Err(GameError::SessionNotPlaying)));
        assert!(controller.complete_reveal().is_none());
    }

    #[test]
    fn invalid_guesses_are_rejected_without_mutation() {
        let words = words();
        let mut controller = controller(&words);

        assert!(matches!(
            controller.submit_guess("spee"),
            Err(GameError::InvalidGuess(InvalidGuess::TooShort))
        ));
        assert!(matches!(
            controller.submit_guess("speeds"),
            Err(GameError::InvalidGuess(InvalidGuess::TooLong))
        ));
        assert!(matches!(
            controller.submit_guess("zzzzz"),
            Err(GameError::InvalidGuess(InvalidGuess::NotInDictionary))
        ));
        assert!(matches!(
            controller.submit_guess("sp3ed"),
            Err(GameError::InvalidGuess(InvalidGuess::NotInDictionary))
        ));
        assert!(controller.session().unwrap().attempts().is_empty());
    }

    #[test]
    fn winning_guess_transitions_to_won() {
        let words = words();
        let mut controller = controller(&words);

        let report = controller.guess("erase").unwrap();
        assert_eq!(report.feedback.to_string(), "Y--YY");
        assert_eq!(report.status, SessionStatus::Playing);
        assert!(report.outcome.is_none());

        let report = controller.guess("speed").unwrap();
        assert!(report.feedback.is_perfect());
        assert_eq!(report.status, SessionStatus::Won);

        let outcome = report.outcome.unwrap();
        assert_eq!(outcome.result.attempts, 1);
        assert_eq!(outcome.result.score, 90);
        assert!(!outcome.skipped);
    }

    #[test]
    fn sixth_miss_transitions_to_lost() {
        let words = words();
        let mut controller = controller(&words);
        let outcome = lose(&mut controller);

        let session = controller.session().unwrap();
        assert_eq!(session.status(), SessionStatus::Lost);
        assert_eq!(session.attempts().len(), MAX_ATTEMPTS);
        assert!(!outcome.result.won);
        assert_eq!(outcome.result.score, 0);

        assert!(matches!(controller.guess("speed"), Err(GameError::SessionNotPlaying)));
        assert!(matches!(controller.use_hint(100), Err(GameError::SessionNotPlaying)));
    }

    #[test]
    fn reveal_phase_blocks_input() {
        let words = words();
        let mut controller = controller(&words);

        controller.submit_guess("slate").unwrap();
        assert!(controller.session().unwrap().is_revealing());
        assert!(matches!(controller.submit_guess("crane"), Err(GameError::SessionNotPlaying)));
        assert!(matches!(controller.type_letter('a'), Err(GameError::SessionNotPlaying)));
        assert!(matches!(controller.use_dart(100), Err(GameError::SessionNotPlaying)));

        // Keyboard is only updated once the reveal completes
        assert_eq!(
            controller.session().unwrap().keyboard().status('S'),
            crate::core::LetterStatus::Unknown
        );
        assert!(controller.complete_reveal().is_none());
        assert_eq!(
            controller.session().unwrap().keyboard().status('S'),
            crate::core::LetterStatus::Correct
        );
        assert!(controller.submit_guess("crane").is_ok());
    }

    #[test]
    fn typing_respects_disabled_letters_and_locks() {
        let words = words();
        let mut controller = controller(&words);

        let dart = controller.use_dart(100).unwrap();
        let disabled = dart.effect[0];
        assert!(!controller.type_letter(disabled).unwrap());
        assert!(!controller.type_letter('1').unwrap());

        controller.use_hint(100).unwrap();
        for c in "SPEED".chars() {
            controller.type_letter(c).unwrap();
        }
        assert!(controller.session().unwrap().buffer().is_full());
        assert!(controller.backspace().unwrap().is_some());

        assert_eq!(controller.session().unwrap().buffer().text().len(), 4);
    }

    #[test]
    fn submit_forces_locked_letters() {
        let words = words();
        let mut controller = controller(&words);

        // Lock everything, then any five letters become the target
        for _ in 0..WORD_LENGTH {
            controller.use_hint(1000).unwrap();
        }
        let report = controller.guess("xxxxx").unwrap();
        assert_eq!(report.status, SessionStatus::Won);
    }

    #[test]
    fn submit_input_uses_buffer() {
        let words = words();
        let mut controller = controller(&words);
        for c in "spend".chars() {
            assert!(controller.type_letter(c).unwrap());
        }
        let feedback = controller.submit_input().unwrap();
        assert_eq!(feedback.to_string(), "GGG-G");
        controller.complete_reveal();
        assert_eq!(controller.session().unwrap().buffer().text(), "");
    }

    #[test]
    fn restart_resets_attempts_and_keeps_target() {
        let words = words();
        let mut controller = controller(&words);
        lose(&mut controller);
        let keyboard_before = controller.session().unwrap().keyboard().clone();

        controller.check_retry().unwrap();
        controller.restart_lost();

        let session = controller.session().unwrap();
        assert_eq!(session.status(), SessionStatus::Playing);
        assert!(session.attempts().is_empty());
        assert_eq!(session.target().text(), "SPEED");
        assert_eq!(session.keyboard(), &keyboard_before);
    }

    #[test]
    fn retry_preconditions() {
        let words = words();
        let mut controller = controller(&words);
        assert!(matches!(controller.check_retry(), Err(GameError::SessionNotTerminal)));

        // Restarting a playing session is a no-op
        let mut playing = self::controller(&words);
        playing.guess("slate").unwrap();
        playing.restart_lost();
        assert_eq!(playing.session().unwrap().attempts().len(), 1);

        lose(&mut controller);
        controller.check_retry().unwrap();
        controller.restart_lost();
        controller.guess("speed").unwrap();
        assert!(matches!(controller.check_retry(), Err(GameError::LevelAlreadyWon)));
    }

    #[test]
    fn skip_completes_level() {
        let words = words();
        let mut controller = controller(&words);
        controller.guess("slate").unwrap();

        let spent = controller.use_skip(25).unwrap();
        assert_eq!(spent.coins, 0);
        assert!(spent.effect.skipped);
        assert_eq!(spent.effect.result.attempts, 1);
        assert_eq!(controller.session().unwrap().status(), SessionStatus::Won);
        assert!(matches!(controller.use_skip(100), Err(GameError::SessionNotPlaying)));
    }
}
