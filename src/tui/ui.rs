use crate::core::{Engine, UiState};
use crate::tui::component::Component;
use crate::tui::components::{CharacterList, Detail, FilterSheet, StatusView, TitleBar};
use crate::tui::{Screen, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

pub fn draw_ui(frame: &mut Frame, engine: &Engine, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, search_area, main_area] =
        Layout::vertical([Length(1), Length(3), Min(0)]).areas(frame.area());

    let status_message = if engine.is_paginating() {
        "Loading more…".to_string()
    } else if engine.is_end_of_data() {
        "end of catalog".to_string()
    } else {
        String::new()
    };
    TitleBar::new(engine.characters().len(), engine.filters(), status_message)
        .render(frame, title_area);

    if let Screen::Detail(character) = &tui.screen {
        let [_, detail_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());
        Detail::new(character).render(frame, detail_area);
        return;
    }

    tui.search_bar.focused = tui.filter_sheet.is_none();
    tui.search_bar.render(frame, search_area);

    match engine.state() {
        UiState::Loading => {
            tui.character_list.at_bottom = false;
            StatusView::Loading { spinner_frame }.render(frame, main_area);
        }
        UiState::Failed(message) => {
            tui.character_list.at_bottom = false;
            StatusView::Failed { message }.render(frame, main_area);
        }
        UiState::Loaded(characters) => {
            CharacterList::new(
                &mut tui.character_list,
                characters,
                engine.highlighted_ids(),
                engine.is_paginating(),
                engine.is_end_of_data(),
            )
            .render(frame, main_area);
        }
    }

    if let Some(sheet) = tui.filter_sheet.as_mut() {
        FilterSheet::new(sheet).render(frame, frame.area());
    }
}
