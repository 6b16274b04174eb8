use chess::{Board, Color, File, Piece, Rank, Square};

const FILES: &str = "  a b c d e f g h";

fn piece_char(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    }
}

/// Text diagram with White at the bottom. The engine's pieces are upper
/// case and the opponent's lower case, whichever color each plays, so the
/// output stays plain text without terminal colors.
pub fn render_board(board: &Board, engine_color: Color) -> String {
    let (top, bottom) = match engine_color {
        Color::White => ("Opponent", "Engine"),
        Color::Black => ("Engine", "Opponent"),
    };

    let mut result = String::new();
    result.push_str(top);
    result.push('\n');
    result.push_str(FILES);
    result.push('\n');

    for rank in (0..8).rev() {
        result.push_str(&format!("{} ", rank + 1));
        for file in 0..8 {
            let square = Square::make_square(Rank::from_index(rank), File::from_index(file));
            let c = match (board.piece_on(square), board.color_on(square)) {
                (Some(piece), Some(color)) if color == engine_color => {
                    piece_char(piece).to_ascii_uppercase()
                }
                (Some(piece), Some(_)) => piece_char(piece),
                _ => '.',
            };
            result.push(c);
            if file < 7 {
                result.push(' ');
            }
        }
        result.push('\n');
    }

    result.push_str(FILES);
    result.push('\n');
    result.push_str(bottom);
    result.push('\n');
    result
}
