//! UI rendering

use crate::app::{ActivePane, App};
use crate::display::ImagePlacement;
use crate::faces;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Draw the UI
pub fn draw(frame: &mut Frame, app: &mut App) {
    app.placements.clear();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Active pane
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    match app.pane {
        ActivePane::Listing => render_listing(frame, app, chunks[0]),
        ActivePane::FacePreview => render_faces(frame, app, chunks[0]),
        ActivePane::FaceDetail => render_detail(frame, app, chunks[0]),
    }

    render_status_bar(frame, app, chunks[1]);
}

fn render_listing(frame: &mut Frame, app: &App, area: Rect) {
    if app.listing.families.is_empty() {
        let text = vec![
            Line::from(Span::styled("No font families to choose from", app.theme.title)),
            Line::default(),
            Line::from(Span::styled(
                "Pass family names on the command line or list them under `families` in the config file.",
                app.theme.hint,
            )),
        ];
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), area);
        return;
    }

    let items: Vec<ListItem> = app
        .listing
        .families
        .iter()
        .map(|family| ListItem::new(Line::from(Span::styled(family.clone(), app.theme.base))))
        .collect();
    let list = List::new(items).highlight_style(app.theme.list_selected);

    let mut state = ListState::default();
    state.select(Some(app.listing.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_faces(frame: &mut Frame, app: &mut App, area: Rect) {
    let header = faces::header_lines(&app.faces.family, area.width, &app.theme);
    let header_rows = header.len() as u16;
    frame.render_widget(Paragraph::new(header), area);

    let geometry = faces::preview_geometry(
        &app.faces.settings,
        area.width,
        area.height,
        header_rows,
        app.cell_size,
    );

    // Never blocks: a miss starts a render and comes back as pending
    let entry = app.dispatcher.request(&geometry.key);
    let Some(previews) = entry.displayable() else {
        return;
    };

    let mut next_id = 1;
    for row in faces::preview_rows(area, header_rows, geometry.num_lines) {
        let Some(sample) = previews.get(row.slot) else {
            continue;
        };

        let (before, key, after) = row.slot.label_parts();
        let title = Line::from(vec![
            Span::styled(before, app.theme.base),
            Span::styled(key, app.theme.slot_key),
            Span::styled(after, app.theme.base),
            Span::styled(format!(": {}", sample.display_name), app.theme.base),
        ]);
        frame.render_widget(Paragraph::new(title), row.title);

        if let Some(image_area) = row.image {
            frame.render_widget(Clear, image_area);
            app.placements.push(ImagePlacement {
                id: next_id,
                path: sample.artifact_path.clone(),
                width_px: geometry.key.width,
                height_px: geometry.key.height,
                area: image_area,
            });
            next_id += 1;
        }
    }
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let slot = app.detail_slot;
    let spec = app.faces.settings.get(slot);
    let text = vec![
        Line::from(Span::styled(
            format!("{} face of {}", slot.label(), app.faces.family),
            app.theme.title,
        )),
        Line::default(),
        Line::from(vec![
            Span::styled(format!("{slot}: "), app.theme.base),
            Span::styled(spec.to_string(), app.theme.slot_key),
        ]),
        Line::default(),
        Line::from(vec![
            Span::styled("Press ", app.theme.hint),
            Span::styled("a", app.theme.slot_key),
            Span::styled(" to derive this style automatically, ", app.theme.hint),
            Span::styled("Esc", app.theme.back_key),
            Span::styled(" to go back to the previews.", app.theme.hint),
        ]),
    ];
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match &app.status_message {
        Some(message) => (format!(" {message}"), app.theme.error),
        None => {
            let hint = match app.pane {
                ActivePane::Listing => " facepick | j/k: move  Enter: preview  q: quit",
                ActivePane::FacePreview => " facepick | Enter: select  r/b/i/o: fine-tune  Esc: back",
                ActivePane::FaceDetail => " facepick | a: auto  Esc: back",
            };
            (
                hint.to_string(),
                Style::default()
                    .fg(app.theme.status_bar_fg)
                    .bg(app.theme.status_bar_bg),
            )
        }
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}
