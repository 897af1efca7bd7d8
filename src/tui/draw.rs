use crate::tui::app::{App, SortMode};
use flownet::{Arc, Node};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::Color::White;
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Padding, Row, Table};

pub fn draw_app(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Percentage(45),
            Constraint::Min(5),
        ])
        .split(frame.area());

    frame.render_widget(build_header(app), chunks[0]);
    frame.render_widget(build_node_table(app), chunks[2]);
    frame.render_widget(build_arc_table(app), chunks[3]);
}

fn role(node: &Node<String>) -> (&'static str, Style) {
    match (node.is_source(), node.is_sink()) {
        (true, true) => ("isolated", Style::default().add_modifier(Modifier::DIM)),
        (true, false) => ("source", Style::default().fg(Color::Green)),
        (false, true) => ("sink", Style::default().fg(Color::Yellow)),
        (false, false) => ("", Style::default()),
    }
}

fn build_header(app: &'_ App) -> Block<'_> {
    let summary = match app.outcome() {
        Ok(outcome) => vec![
            Span::raw(" Max flow: ").style(Style::default().add_modifier(Modifier::DIM)),
            Span::raw(format!("{}", outcome.value())).style(Style::default().bold()),
            Span::raw(" Augmentations: ").style(Style::default().add_modifier(Modifier::DIM)),
            Span::raw(format!("{}", outcome.augmentations())).style(Style::default().bold()),
        ],
        Err(message) => vec![Span::raw(format!(" {} ", message)).style(Style::default().red())],
    };

    let mut spans = vec![
        Span::raw(" Flownet ").style(Style::default().bold().cyan()),
        Span::raw(format!("[{}]", app.title())).style(Style::default().add_modifier(Modifier::DIM)),
    ];
    spans.extend(summary);
    spans.push(Span::raw(" "));

    Block::new()
        .title(Line::from(spans))
        .title_alignment(Alignment::Center)
}

fn build_node_table(app: &'_ App) -> Table<'_> {
    let network = app.network();

    Table::new(
        network.nodes().filter_map(|key| network.node(key)).map(|node| {
            let (role, role_style) = role(node);
            Row::new(vec![
                Cell::from(node.key().clone()),
                Cell::from(format!("{:>4}", node.indegree())),
                Cell::from(format!("{:>4}", node.out_degree())),
                Cell::from(role).style(role_style),
            ])
        }),
        [
            Constraint::Length(24),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new([
            Cell::from("Node"),
            Cell::from("  In"),
            Cell::from(" Out"),
            Cell::from("Role"),
        ])
        .style(Style::default().bg(Color::DarkGray).fg(White)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::from(format!(" Nodes ({}) ", network.order())).style(Style::default().bold()),
            ]))
            .padding(Padding::horizontal(1)),
    )
}

fn build_arc_table(app: &'_ App) -> Table<'_> {
    let mut arcs = app.network().arcs();
    if let SortMode::Capacity = app.sort_mode {
        arcs.sort_by(|a, b| b.capacity().total_cmp(&a.capacity()));
    }
    let is_cut = |arc: &Arc<String>| {
        app.outcome()
            .is_ok_and(|outcome| outcome.min_cut().contains(arc.from(), arc.to()))
    };

    let rows = arcs
        .iter()
        .map(|arc| {
            let style = if is_cut(arc) {
                Style::default().fg(Color::Red).bold()
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(arc.from().clone()),
                Cell::from(arc.to().clone()),
                Cell::from(format!("{:>8.1}", arc.capacity())),
                Cell::from(if is_cut(arc) { "cut" } else { "" }),
            ])
            .style(style)
        })
        .collect::<Vec<Row>>();

    let sort_label = match app.sort_mode {
        SortMode::Name => "name",
        SortMode::Capacity => "capacity",
    };

    Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(24),
            Constraint::Length(10),
            Constraint::Length(5),
        ],
    )
    .header(
        Row::new([
            Cell::from("From"),
            Cell::from("To"),
            Cell::from("     Cap"),
            Cell::from(""),
        ])
        .style(Style::default().bg(Color::DarkGray).fg(White)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::from(format!(" Arcs ({}) ", app.network().size())).style(Style::default().bold()),
                Span::from(format!("sorted by {} ", sort_label))
                    .style(Style::default().add_modifier(Modifier::DIM)),
            ]))
            .padding(Padding::horizontal(1)),
    )
}
