use crate::difficulty::Difficulty;
use crate::game::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Steer(Direction),
    Pick(Difficulty),
    Start,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if (ev.modifiers, ev.code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
            return Some(Command::Quit);
        }
        if !normal_modifiers.contains(ev.modifiers) {
            return None;
        }
        match ev.code {
            KeyCode::Char('w' | 'W' | 'k') | KeyCode::Up => Some(Command::Steer(Direction::Up)),
            KeyCode::Char('s' | 'S' | 'j') | KeyCode::Down => {
                Some(Command::Steer(Direction::Down))
            }
            KeyCode::Char('a' | 'A' | 'h') | KeyCode::Left => {
                Some(Command::Steer(Direction::Left))
            }
            KeyCode::Char('d' | 'D' | 'l') | KeyCode::Right => {
                Some(Command::Steer(Direction::Right))
            }
            KeyCode::Char('1') => Some(Command::Pick(Difficulty::Easy)),
            KeyCode::Char('2') => Some(Command::Pick(Difficulty::Medium)),
            KeyCode::Char('3') => Some(Command::Pick(Difficulty::Hard)),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Start),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Command::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Command::Quit))]
    #[case(KeyCode::Up.into(), Some(Command::Steer(Direction::Up)))]
    #[case(KeyCode::Char('w').into(), Some(Command::Steer(Direction::Up)))]
    #[case(
        KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT),
        Some(Command::Steer(Direction::Up))
    )]
    #[case(KeyCode::Char('j').into(), Some(Command::Steer(Direction::Down)))]
    #[case(KeyCode::Char('a').into(), Some(Command::Steer(Direction::Left)))]
    #[case(KeyCode::Right.into(), Some(Command::Steer(Direction::Right)))]
    #[case(KeyCode::Char('1').into(), Some(Command::Pick(Difficulty::Easy)))]
    #[case(KeyCode::Char('2').into(), Some(Command::Pick(Difficulty::Medium)))]
    #[case(KeyCode::Char('3').into(), Some(Command::Pick(Difficulty::Hard)))]
    #[case(KeyCode::Enter.into(), Some(Command::Start))]
    #[case(KeyCode::Char(' ').into(), Some(Command::Start))]
    #[case(KeyCode::Char('q').into(), Some(Command::Quit))]
    #[case(KeyCode::Esc.into(), Some(Command::Quit))]
    #[case(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::ALT), None)]
    #[case(KeyCode::Char('x').into(), None)]
    fn test_from_key_event(#[case] ev: KeyEvent, #[case] cmd: Option<Command>) {
        assert_eq!(Command::from_key_event(ev), cmd);
    }
}
