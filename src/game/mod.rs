//! Arithmetic mini-game
//!
//! A reward unlocked by lesson progress. Challenges are generated
//! independently of the progress engine; round counters are transient and
//! reset when the game screen is exited.

use rand::Rng;

/// Operand range for generated challenges
const OPERAND_RANGE: std::ops::RangeInclusive<i32> = 1..=10;

/// Arithmetic operator for a challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    /// Display symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "x",
        }
    }

    /// Apply the operator to two operands
    fn apply(self, a: i32, b: i32) -> i32 {
        match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
        }
    }
}

/// One arithmetic challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge {
    pub operand_a: i32,
    pub operand_b: i32,
    pub operator: Operator,
    /// Computed answer; subtraction may be negative, no clamping
    pub expected_answer: i32,
}

impl Challenge {
    /// Build a challenge from its parts, computing the expected answer
    pub fn new(operand_a: i32, operand_b: i32, operator: Operator) -> Self {
        Self { operand_a, operand_b, operator, expected_answer: operator.apply(operand_a, operand_b) }
    }

    /// Prompt text, e.g. "What is 3 x 4?"
    pub fn prompt(&self) -> String {
        format!("What is {} {} {}?", self.operand_a, self.operator.symbol(), self.operand_b)
    }
}

/// Generate the next challenge: operands uniform in 1-10, operator uniform
/// over add/subtract/multiply
pub fn next_challenge<R: Rng + ?Sized>(rng: &mut R) -> Challenge {
    let operand_a = rng.gen_range(OPERAND_RANGE);
    let operand_b = rng.gen_range(OPERAND_RANGE);
    let operator = match rng.gen_range(0..3) {
        0 => Operator::Add,
        1 => Operator::Subtract,
        _ => Operator::Multiply,
    };
    Challenge::new(operand_a, operand_b, operator)
}

/// Check an answer against a challenge
pub fn submit_answer(challenge: &Challenge, answer: i32) -> bool {
    answer == challenge.expected_answer
}

/// Counters for one game session; dropped when the game screen is exited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRound {
    pub score: u32,
    pub questions_answered: u32,
    pub current: Option<Challenge>,
}

impl GameRound {
    /// Start a fresh round
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current challenge, generating one if needed
    pub fn challenge<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Challenge {
        *self.current.get_or_insert_with(|| next_challenge(rng))
    }

    /// Score an answer to the current challenge, advancing the counters
    ///
    /// Returns `None` if no challenge is active.
    pub fn submit(&mut self, answer: i32) -> Option<bool> {
        let challenge = self.current.take()?;
        let correct = submit_answer(&challenge, answer);
        if correct {
            self.score += 1;
        }
        self.questions_answered += 1;
        Some(correct)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn subtraction_can_go_negative() {
        let challenge = Challenge::new(3, 7, Operator::Subtract);
        assert_eq!(challenge.expected_answer, -4);
        assert!(submit_answer(&challenge, -4));
        assert!(!submit_answer(&challenge, 4));
    }

    #[test]
    fn operators_compute_expected_answers() {
        assert_eq!(Challenge::new(3, 4, Operator::Add).expected_answer, 7);
        assert_eq!(Challenge::new(9, 4, Operator::Subtract).expected_answer, 5);
        assert_eq!(Challenge::new(5, 3, Operator::Multiply).expected_answer, 15);
    }

    #[test]
    fn generated_operands_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let c = next_challenge(&mut rng);
            assert!((1..=10).contains(&c.operand_a));
            assert!((1..=10).contains(&c.operand_b));
            assert_eq!(c.expected_answer, c.operator.apply(c.operand_a, c.operand_b));
        }
    }

    #[test]
    fn every_operator_shows_up() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..100 {
            match next_challenge(&mut rng).operator {
                Operator::Add => seen[0] = true,
                Operator::Subtract => seen[1] = true,
                Operator::Multiply => seen[2] = true,
            }
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn round_counts_correct_and_total() {
        let mut round = GameRound::new();
        round.current = Some(Challenge::new(2, 2, Operator::Add));
        assert_eq!(round.submit(4), Some(true));

        round.current = Some(Challenge::new(2, 2, Operator::Add));
        assert_eq!(round.submit(5), Some(false));

        assert_eq!(round.score, 1);
        assert_eq!(round.questions_answered, 2);
        assert!(round.current.is_none());
    }

    #[test]
    fn submit_without_challenge_is_a_no_op() {
        let mut round = GameRound::new();
        assert_eq!(round.submit(1), None);
        assert_eq!(round.questions_answered, 0);
    }

    #[test]
    fn challenge_is_cached_until_answered() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut round = GameRound::new();
        let first = round.challenge(&mut rng);
        let again = round.challenge(&mut rng);
        assert_eq!(first, again);
    }

    #[test]
    fn prompt_reads_naturally() {
        let challenge = Challenge::new(3, 4, Operator::Multiply);
        assert_eq!(challenge.prompt(), "What is 3 x 4?");
    }
}
