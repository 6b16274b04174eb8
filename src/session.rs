use crate::board;
use crate::captured::CapturedSet;
use crate::error::{EngineError, Result};
use crate::render::render_board;
use crate::stats::GameStats;
use crate::supervisor::SearchSupervisor;
use chess::{Board, BoardStatus, ChessMove, Color};
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Searches in a row that may come back with an unusable move before the
/// engine turn is abandoned.
const MAX_ENGINE_ATTEMPTS: usize = 3;

/// Drives a game between the engine and a human typing coordinate moves.
pub struct SessionController<R, W> {
    board: Board,
    captured: CapturedSet,
    engine_color: Color,
    supervisor: SearchSupervisor,
    stats: GameStats,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> SessionController<R, W> {
    pub fn new(supervisor: SearchSupervisor, engine_color: Color, board: Board, input: R, output: W) -> Self {
        Self {
            board,
            captured: CapturedSet::new(),
            engine_color,
            supervisor,
            stats: GameStats::new(),
            input,
            output,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn captured(&self) -> &CapturedSet {
        &self.captured
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Plays until the game ends or the opponent's input runs out.
    pub fn run(&mut self) -> Result<&GameStats> {
        self.show_board()?;

        while !board::is_game_over(&self.board) {
            if self.board.side_to_move() == self.engine_color {
                self.engine_turn()?;
            } else if !self.opponent_turn()? {
                writeln!(self.output, "No more input, stopping.")?;
                return Ok(&self.stats);
            }
        }

        self.announce_result()?;
        Ok(&self.stats)
    }

    fn engine_turn(&mut self) -> Result<()> {
        writeln!(self.output, "<ENGINE TURN>")?;
        let timeout = self.supervisor.config().timeout;

        let mut rejected = None;
        for _ in 0..MAX_ENGINE_ATTEMPTS {
            let outcome = self
                .supervisor
                .find_best_move(&self.board, &self.captured, timeout)?;
            if outcome.timed_out {
                writeln!(self.output, "Time limit exceeded! Using the best move found so far.")?;
            }
            self.stats.engine_times.push(outcome.elapsed);
            writeln!(self.output, "Search time: {:.2}s", outcome.elapsed.as_secs_f64())?;

            let mv = outcome.best_move;
            if !board::is_legal(&self.board, mv) {
                warn!(%mv, "engine proposed an illegal move, searching again");
                writeln!(self.output, "Engine suggested illegal move {}! Trying again.", mv)?;
                rejected = Some(mv);
                continue;
            }

            self.play(mv, self.engine_color);
            self.stats.engine_moves.push(mv.to_string());
            writeln!(self.output, "Engine move: {}", mv)?;
            return self.show_board();
        }

        Err(EngineError::IllegalMove {
            mv: rejected.map(|mv| mv.to_string()).unwrap_or_default(),
        })
    }

    /// Returns false when input is exhausted.
    fn opponent_turn(&mut self) -> Result<bool> {
        writeln!(self.output, "<OPPONENT TURN>")?;
        loop {
            write!(self.output, "Enter the opponent's move: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            match board::parse_move(&self.board, text) {
                Ok(mv) => {
                    self.play(mv, !self.engine_color);
                    self.stats.opponent_moves.push(mv.to_string());
                    self.show_board()?;
                    return Ok(true);
                }
                Err(err) => {
                    info!(input = text, %err, "rejected opponent move");
                    writeln!(self.output, "{}. Try again.", err)?;
                }
            }
        }
    }

    fn play(&mut self, mv: ChessMove, mover: Color) {
        if let Some(piece) = board::captured_piece(&self.board, mv) {
            self.captured.push(mover, piece);
        }
        self.board = board::apply(&self.board, mv);
    }

    fn show_board(&mut self) -> Result<()> {
        write!(self.output, "{}", render_board(&self.board, self.engine_color))?;
        Ok(())
    }

    fn announce_result(&mut self) -> Result<()> {
        let message = match self.board.status() {
            BoardStatus::Checkmate if self.board.side_to_move() == self.engine_color => {
                "Checkmate, the opponent wins."
            }
            BoardStatus::Checkmate => "Checkmate, the engine wins.",
            BoardStatus::Stalemate => "Stalemate.",
            BoardStatus::Ongoing => return Ok(()),
        };
        info!(result = message, "game over");
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use std::io::Cursor;
    use std::time::Duration;

    fn session(
        engine_color: Color,
        board: Board,
        input: &str,
    ) -> SessionController<Cursor<Vec<u8>>, Vec<u8>> {
        let config = SearchConfig::new()
            .with_depth(1)
            .with_timeout(Duration::from_secs(60))
            .with_seed(11);
        SessionController::new(
            SearchSupervisor::new(config),
            engine_color,
            board,
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
        )
    }

    #[test]
    fn test_illegal_input_is_retried() {
        let mut game = session(Color::Black, board::starting_position(), "e2e5\nbogus\ne2e4\n");
        let stats = game.run().unwrap().clone();

        assert_eq!(stats.opponent_moves, vec!["e2e4".to_string()]);
        assert_eq!(stats.engine_moves.len(), 1);
        assert_eq!(stats.engine_times.len(), 1);

        let output = String::from_utf8(game.output.clone()).unwrap();
        assert!(output.contains("illegal move e2e5"));
        assert!(output.contains("could not read move 'bogus'"));
        assert!(output.contains("Engine move: "));
        assert_eq!(game.board().side_to_move(), Color::White);
    }

    #[test]
    fn test_engine_moves_first_as_white() {
        let mut game = session(Color::White, board::starting_position(), "");
        let stats = game.run().unwrap().clone();

        assert_eq!(stats.engine_moves.len(), 1);
        assert!(stats.opponent_moves.is_empty());
    }

    #[test]
    fn test_captures_are_recorded_for_the_mover() {
        // The opponent (White) takes the queen, then the engine replies
        let start = board::from_fen("k7/8/8/3q4/8/8/8/K2R4 w - - 0 1").unwrap();
        let mut game = session(Color::Black, start, "d1d5\n");
        game.run().unwrap();

        assert_eq!(game.captured().captured_by(Color::White), &[chess::Piece::Queen]);
        assert_eq!(game.stats().engine_moves.len(), 1);
    }

    #[test]
    fn test_game_over_is_announced() {
        // White mates on the back rank
        let start = board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let mut game = session(Color::Black, start, "a1a8\n");
        game.run().unwrap();

        let output = String::from_utf8(game.output.clone()).unwrap();
        assert!(output.contains("Checkmate, the opponent wins."));
        assert!(game.stats().engine_moves.is_empty());
    }
}
