use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEventKind as CrossMouseKind};

use crate::frontend::traits::{FrontendEvent, MouseEvent, MouseEventKind};
use crate::keybinding::KeyEvent;

pub fn convert_event(event: Event) -> Option<FrontendEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind == KeyEventKind::Press || key_event.kind == KeyEventKind::Repeat {
                KeyEvent::from_terminal(key_event).map(FrontendEvent::Key)
            } else {
                None
            }
        }
        Event::Resize(width, height) => Some(FrontendEvent::Resize(width, height)),
        Event::Mouse(mouse_event) => {
            let kind = match mouse_event.kind {
                CrossMouseKind::Down(MouseButton::Left) => Some(MouseEventKind::Down),
                CrossMouseKind::Up(MouseButton::Left) => Some(MouseEventKind::Up),
                CrossMouseKind::Drag(MouseButton::Left) => Some(MouseEventKind::Drag),
                CrossMouseKind::ScrollUp => Some(MouseEventKind::ScrollUp),
                CrossMouseKind::ScrollDown => Some(MouseEventKind::ScrollDown),
                _ => None,
            };

            kind.map(|k| {
                FrontendEvent::Mouse(MouseEvent {
                    kind: k,
                    column: mouse_event.column,
                    row: mouse_event.row,
                })
            })
        }
        Event::Paste(text) => Some(FrontendEvent::Paste(text)),
        Event::FocusGained => Some(FrontendEvent::Focus(true)),
        Event::FocusLost => Some(FrontendEvent::Focus(false)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseEvent as CrossMouseEvent};

    #[test]
    fn test_left_click_becomes_down() {
        let event = Event::Mouse(CrossMouseEvent {
            kind: CrossMouseKind::Down(MouseButton::Left),
            column: 7,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        match convert_event(event) {
            Some(FrontendEvent::Mouse(mouse)) => {
                assert_eq!(mouse.kind, MouseEventKind::Down);
                assert_eq!((mouse.column, mouse.row), (7, 0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_right_click_is_ignored() {
        let event = Event::Mouse(CrossMouseEvent {
            kind: CrossMouseKind::Down(MouseButton::Right),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert!(convert_event(event).is_none());
    }

    #[test]
    fn test_paste_passes_text_through() {
        match convert_event(Event::Paste("a\nb".to_string())) {
            Some(FrontendEvent::Paste(text)) => assert_eq!(text, "a\nb"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
