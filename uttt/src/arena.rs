use enum_map::{Enum, EnumMap};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use uttt_types::{Mark, Outcome};

use crate::{board::Board, board::DEFAULT_SUB_SIZE, Player};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Seat {
    A,
    B,
}

impl Seat {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Enum)]
pub enum Credit {
    PlayerA,
    Draw,
    PlayerB,
}

impl From<Option<Seat>> for Credit {
    fn from(winner: Option<Seat>) -> Self {
        match winner {
            Some(Seat::A) => Credit::PlayerA,
            Some(Seat::B) => Credit::PlayerB,
            None => Credit::Draw,
        }
    }
}

/// Tally from player A's point of view. Ordered field by field.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize, Deserialize,
)]
pub struct Score {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl Score {
    #[must_use]
    pub const fn games(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

impl From<EnumMap<Credit, u32>> for Score {
    fn from(tally: EnumMap<Credit, u32>) -> Self {
        Self {
            wins: tally[Credit::PlayerA],
            draws: tally[Credit::Draw],
            losses: tally[Credit::PlayerB],
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.wins, self.draws, self.losses)
    }
}

/// Plays a fixed number of games between two players.
pub struct Arena {
    games: u32,
    display: bool,
    sub_size: usize,
    progress: ProgressBar,
}

impl Arena {
    #[must_use]
    pub fn new(games: u32) -> Self {
        Self {
            games,
            display: false,
            sub_size: DEFAULT_SUB_SIZE,
            progress: ProgressBar::hidden(),
        }
    }

    #[must_use]
    pub fn with_display(self, display: bool) -> Self {
        Self { display, ..self }
    }

    #[must_use]
    pub fn with_sub_size(self, sub_size: usize) -> Self {
        Self { sub_size, ..self }
    }

    #[must_use]
    pub fn with_progress(self, progress: ProgressBar) -> Self {
        Self { progress, ..self }
    }

    pub fn evaluate(&self, a: &mut dyn Player, b: &mut dyn Player) -> Score {
        let mut tally = EnumMap::<Credit, u32>::default();
        self.progress.set_length(u64::from(self.games));
        self.progress.set_position(0);
        for game in 0..self.games {
            let mut display = self.display;
            let first = if a.is_interactive() {
                display = true;
                if a.asks_to_move_first() {
                    Seat::A
                } else {
                    Seat::B
                }
            } else if b.is_interactive() {
                display = true;
                if b.asks_to_move_first() {
                    Seat::B
                } else {
                    Seat::A
                }
            } else {
                self.starting_seat(game)
            };

            let winner = self.play_game(a, b, first, display);
            log::debug!("game {game}: {first:?} started, winner {winner:?}");
            tally[Credit::from(winner)] += 1;
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();

        let score = Score::from(tally);
        log::debug!("evaluation finished {score}");
        score
    }

    /// Plays `player` against an independent copy of itself.
    pub fn evaluate_mirror<P: Player + Clone>(&self, player: &mut P) -> Score {
        let mut copy = player.clone();
        self.evaluate(player, &mut copy)
    }

    /// Player A opens the first half of the games, player B the rest.
    #[must_use]
    pub fn starting_seat(&self, game: u32) -> Seat {
        if 2 * game < self.games {
            Seat::A
        } else {
            Seat::B
        }
    }

    fn play_game(
        &self,
        a: &mut dyn Player,
        b: &mut dyn Player,
        first: Seat,
        display: bool,
    ) -> Option<Seat> {
        let mut board = Board::with_sub_size(self.sub_size);
        let mut seat = first;
        loop {
            if display {
                println!("\n{board}");
            }
            let player: &mut dyn Player = match seat {
                Seat::A => &mut *a,
                Seat::B => &mut *b,
            };
            let action = player.choose_action(&board);
            assert!(
                board.is_valid_action(action),
                "{seat:?} chose illegal action {action}"
            );
            board.play(action);

            match board.outcome(Mark::Plus) {
                Outcome::Ongoing => {
                    board.flip();
                    seat = seat.other();
                }
                outcome => {
                    if display {
                        println!("\n{}", board.flip());
                    }
                    return (outcome == Outcome::Win).then_some(seat);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        players::{GreedyPlayer, HumanPlayer, RandomPlayer, ValuePlayer},
        testing::{Recorder, ScriptedEstimator},
    };

    #[test]
    fn first_half_to_a() {
        let arena = Arena::new(10);
        let seats: Vec<Seat> = (0..10).map(|g| arena.starting_seat(g)).collect();
        assert_eq!(&seats[..5], &[Seat::A; 5]);
        assert_eq!(&seats[5..], &[Seat::B; 5]);

        let odd = Arena::new(3);
        assert_eq!(odd.starting_seat(1), Seat::A);
        assert_eq!(odd.starting_seat(2), Seat::B);
    }

    #[test]
    fn openers_follow_schedule() {
        let mut a = Recorder::new(RandomPlayer::new(1));
        let mut b = Recorder::new(RandomPlayer::new(2));
        let score = Arena::new(10).evaluate(&mut a, &mut b);
        assert_eq!(score.games(), 10);
        assert_eq!(a.openings(), vec![true, true, true, true, true, false, false, false, false, false]);
        assert_eq!(b.openings(), vec![false, false, false, false, false, true, true, true, true, true]);
    }

    #[test]
    fn greedy_beats_random() {
        let mut greedy = GreedyPlayer::new(0);
        let mut random = RandomPlayer::new(0);
        let score = Arena::new(40).evaluate(&mut greedy, &mut random);
        assert_eq!(score.games(), 40);
        assert!(score.wins > score.losses, "{score}");
    }

    #[test]
    fn mirror_does_not_alias() {
        let mut player = Recorder::new(ValuePlayer::new(ScriptedEstimator::constant(0.5), 3));
        let score = Arena::new(4).evaluate_mirror(&mut player);
        assert_eq!(score.games(), 4);

        // The original only ever saw its own turns: one parity per game, two plies apart
        let mut games: Vec<Vec<u32>> = Vec::new();
        for &m in &player.seen {
            if m <= 1 {
                games.push(Vec::new());
            }
            games.last_mut().expect("game started").push(m);
        }
        assert_eq!(games.len(), 4);
        for game in &games {
            assert!(game.windows(2).all(|w| w[1] == w[0] + 2), "{game:?}");
        }
        assert_eq!(player.openings(), vec![true, true, false, false]);
    }

    #[test]
    fn human_picks_order() {
        let mut a = Recorder::new(RandomPlayer::new(4));
        let mut b = Recorder::interactive(RandomPlayer::new(5), true);
        let score = Arena::new(3).evaluate(&mut a, &mut b);
        assert_eq!(score.games(), 3);
        assert_eq!(b.openings(), vec![true; 3]);
        assert_eq!(a.openings(), vec![false; 3]);

        let mut a = Recorder::interactive(RandomPlayer::new(6), false);
        let mut b = Recorder::new(RandomPlayer::new(7));
        let _ = Arena::new(2).evaluate(&mut a, &mut b);
        assert_eq!(b.openings(), vec![true; 2]);
    }

    #[test]
    fn boxed_players() {
        let mut a: Box<dyn Player> = Box::new(GreedyPlayer::new(1));
        let mut b: Box<dyn Player> = Box::new(RandomPlayer::new(2));
        let score = Arena::new(2).evaluate(&mut a, &mut b);
        assert_eq!(score.games(), 2);

        let human: Box<dyn Player> = Box::new(HumanPlayer::new("".as_bytes(), Vec::new()));
        assert!(human.is_interactive());
    }

    #[test]
    fn score_ordering() {
        let better = Score { wins: 6, draws: 0, losses: 4 };
        let worse = Score { wins: 5, draws: 5, losses: 0 };
        assert!(better > worse);
        assert_eq!(better.to_string(), "(6, 0, 4)");
        assert_eq!(Credit::from(None), Credit::Draw);
    }
}
