use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use engine::constant::{BOARD_HEIGHT, BOARD_WIDTH, RIVER_BLACK_LAST_ROW};
use engine::{Game, Player, Position};
use regex::Regex;
use tracing::debug;

const HELP: &str = "\
commands:
  x y     click the cell at column x (0-8), row y (0-9)
  ai      let the computer move now
  undo    take back your last move
  hint    list where the selected piece can go
  reset   back to the opening position
  red | black   start a new game on that side
  board   show the board again
  help    show this text
  quit    leave";

#[derive(Debug, PartialEq)]
enum Command {
    Click(i32, i32),
    Ai,
    Undo,
    Hint,
    Reset,
    Start(Player),
    Board,
    Help,
    Quit,
}

fn command_regex() -> anyhow::Result<Regex> {
    Regex::new(r"^(?:(?P<x>-?\d+)[\s,]+(?P<y>-?\d+)|(?P<word>[a-z]+))$").context("bad command pattern")
}

fn parse(regex: &Regex, line: &str) -> anyhow::Result<Command> {
    let line = line.trim().to_ascii_lowercase();
    let Some(captures) = regex.captures(&line) else {
        bail!("unknown command `{line}`, type `help`");
    };
    if let (Some(x), Some(y)) = (captures.name("x"), captures.name("y")) {
        return Ok(Command::Click(x.as_str().parse()?, y.as_str().parse()?));
    }
    let command = match captures.name("word").map(|m| m.as_str()) {
        Some("ai") => Command::Ai,
        Some("undo") => Command::Undo,
        Some("hint") => Command::Hint,
        Some("reset") => Command::Reset,
        Some("red") => Command::Start(Player::Red),
        Some("black") => Command::Start(Player::Black),
        Some("board") => Command::Board,
        Some("help") => Command::Help,
        Some("quit") | Some("exit") => Command::Quit,
        _ => bail!("unknown command `{line}`, type `help`"),
    };
    Ok(command)
}

fn paint(text: String, player: Player) -> String {
    match player {
        Player::Red => format!("\x1B[31m{}\x1b[0m", text),
        Player::Black => text,
    }
}

// 吃子的落点后面标 x
fn hints(game: &mut Game) -> String {
    let moves = game.legal_moves_for_selected();
    if moves.is_empty() {
        return "select one of your pieces first".to_owned();
    }
    let list: Vec<String> = moves
        .into_iter()
        .map(|(pos, capture)| if capture { format!("{pos}x") } else { pos.to_string() })
        .collect();
    format!("moves: {}", list.join(" "))
}

// 每个格子占 4 列：两侧是标记，中间是全角字符
fn render(game: &mut Game) -> String {
    let hints: HashMap<Position, bool> = game.legal_moves_for_selected().into_iter().collect();
    let mut out = String::new();

    out.push_str("   ");
    for x in 0..BOARD_WIDTH {
        out.push_str(&format!(" {x}  "));
    }
    out.push('\n');

    for y in 0..BOARD_HEIGHT {
        out.push_str(&format!("{y}  "));
        for x in 0..BOARD_WIDTH {
            let pos = Position::new(x, y);
            let cell = match game.board().piece_at(pos) {
                Some(piece) => {
                    let (l, r) = if piece.selected {
                        ('[', ']')
                    } else if hints.contains_key(&pos) {
                        ('(', ')')
                    } else {
                        (' ', ' ')
                    };
                    paint(format!("{l}{}{r}", piece.kind.name(piece.player)), piece.player)
                }
                None if hints.contains_key(&pos) => " ・ ".to_owned(),
                None => " ＋ ".to_owned(),
            };
            out.push_str(&cell);
        }
        out.push('\n');
        if y == RIVER_BLACK_LAST_ROW {
            out.push_str("   ~~~~~~~~~~~ 楚河        汉界 ~~~~~~~~~~~\n");
        }
    }

    match game.is_game_over() {
        Some(outcome) => out.push_str(&format!("{} wins! type `reset`, `red` or `black`", outcome.winner())),
        None => {
            let turn = game.turn();
            let who = if turn == game.human() { "you" } else { "computer" };
            out.push_str(&format!("{turn} to move ({who})"));
            if game.is_in_check(turn) {
                out.push_str(", in check");
            }
        }
    }
    out.push('\n');
    out
}

pub fn ui(mut game: Game) -> anyhow::Result<()> {
    let regex = command_regex()?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "{HELP}\n")?;
    write!(stdout, "{}", render(&mut game))?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }
        match parse(&regex, &line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(stdout, "{HELP}")?,
            Ok(Command::Hint) => writeln!(stdout, "{}", hints(&mut game))?,
            Ok(command) => {
                debug!(?command, "console command");
                match command {
                    Command::Click(x, y) => {
                        game.click(x, y);
                    }
                    Command::Ai => {
                        if !game.ai_make_move() {
                            writeln!(stdout, "it is your move")?;
                        }
                    }
                    Command::Undo => {
                        if !game.undo() {
                            writeln!(stdout, "nothing to undo")?;
                        }
                    }
                    Command::Reset => game.reset(),
                    Command::Start(side) => game.start(side),
                    _ => {}
                }
                write!(stdout, "{}", render(&mut game))?;
            }
            Err(err) => writeln!(stdout, "{err}")?,
        }
        stdout.flush()?;
    }
    writeln!(stdout, "bye")?;
    Ok(())
}
