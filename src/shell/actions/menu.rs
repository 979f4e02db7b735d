use crossterm::event::KeyCode;

use crate::nav::ScreenId;
use crate::shell::App;

impl App {
    pub fn toggle_menu(&mut self) {
        let menu = &mut self.shell.menu;
        menu.open = !menu.open;
        if menu.open {
            menu.selected = ScreenId::MENU
                .iter()
                .position(|s| *s == self.shell.nav.current())
                .unwrap_or(0);
        }
    }

    pub fn handle_menu_key(&mut self, code: KeyCode) {
        let len = ScreenId::MENU.len();
        let menu = &mut self.shell.menu;

        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                menu.selected = (menu.selected + len - 1) % len;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                menu.selected = (menu.selected + 1) % len;
            }
            KeyCode::Enter => {
                let target = ScreenId::MENU[menu.selected % len];
                menu.open = false;
                self.shell.go(target);
            }
            KeyCode::Char('m') => menu.open = false,
            KeyCode::Char('q') => self.shell.should_quit = true,
            _ => {}
        }
    }
}
