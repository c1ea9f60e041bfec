//! Terminal rendering of composed views, sources and game rounds.

use std::fmt::Write as _;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use matrix_analysis::{SectionBody, ViewSection, visible_sections};
use matrix_model::{
    AnalysisResult, AnalysisSection, Entity, EntityCategory, Field, GameAnswer, GamePair,
    Leaning, ModelScore, PageMatch, WebEntity,
};
use matrix_sources::NewsSource;

/// Width of the model confidence meter, in cells.
const METER_WIDTH: usize = 20;

/// Renders to plain text, with ANSI styling only when `styled`.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub styled: bool,
}

impl Renderer {
    pub fn new(styled: bool) -> Self {
        Self { styled }
    }

    /// Full terminal rendering of an analysis result.
    pub fn result(&self, result: &AnalysisResult) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", result.kind().label());
        for section in visible_sections(result) {
            out.push('\n');
            out.push_str(&self.section(&section));
        }
        out
    }

    pub fn section(&self, section: &ViewSection) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", section.title);
        let _ = writeln!(out, "{}", "─".repeat(section.title.chars().count()));
        let body = match &section.body {
            SectionBody::Fields(fields) => self.fields(fields).to_string(),
            SectionBody::Records(records) => self.records(records),
            SectionBody::List(items) => bullet_list(items),
            SectionBody::Text(text) => text.clone(),
            SectionBody::Narrative(sections) => narrative(sections),
            SectionBody::WebEntities(entities) => self.web_entities(entities).to_string(),
            SectionBody::Pages(pages) => self.pages(pages).to_string(),
            SectionBody::Images(urls) => numbered_list(urls),
            SectionBody::Models(models) => self.models(models).to_string(),
            SectionBody::Entities(entities) => self.entities(entities).to_string(),
            SectionBody::Image(data_url) => format!(
                "PNG image, {} bytes encoded (use --graph-out to save it)",
                data_url.len()
            ),
        };
        out.push_str(body.trim_end());
        out.push('\n');
        out
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(120);
        if self.styled {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        table
    }

    fn fields(&self, fields: &[Field]) -> Table {
        let mut table = self.table();
        for field in fields {
            table.add_row(vec![
                Cell::new(&field.label).add_attribute(Attribute::Bold),
                verdict_cell(&field.value),
            ]);
        }
        table
    }

    fn records(&self, records: &[Vec<Field>]) -> String {
        records
            .iter()
            .enumerate()
            .map(|(index, fields)| format!("#{}\n{}", index + 1, self.fields(fields)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn web_entities(&self, entities: &[WebEntity]) -> Table {
        let mut table = self.table();
        table.set_header(vec![header_cell("Entity"), header_cell("Score")]);
        for entity in entities {
            table.add_row(vec![
                Cell::new(&entity.description),
                match entity.score_display() {
                    Some(score) => Cell::new(score),
                    None => dim_cell("-"),
                },
            ]);
        }
        align_column(&mut table, 1, CellAlignment::Right);
        table
    }

    fn pages(&self, pages: &[PageMatch]) -> Table {
        let mut table = self.table();
        table.set_header(vec![header_cell("Title"), header_cell("URL")]);
        for page in pages {
            table.add_row(vec![Cell::new(&page.title), Cell::new(&page.url)]);
        }
        table
    }

    fn models(&self, models: &[ModelScore]) -> Table {
        let mut table = self.table();
        table.set_header(vec![
            header_cell("Model"),
            header_cell("Prediction"),
            header_cell("Confidence"),
            header_cell(""),
        ]);
        for model in models {
            let color = match model.leaning {
                Leaning::Fake => Color::Red,
                Leaning::Real => Color::Green,
            };
            table.add_row(vec![
                Cell::new(&model.model).add_attribute(Attribute::Bold),
                Cell::new(&model.prediction).fg(color),
                Cell::new(model.confidence_display()),
                Cell::new(meter(model.confidence_percent)).fg(color),
            ]);
        }
        align_column(&mut table, 2, CellAlignment::Right);
        table
    }

    fn entities(&self, entities: &[Entity]) -> Table {
        let mut table = self.table();
        table.set_header(vec![header_cell("Entity"), header_cell("Type")]);
        for entity in entities {
            table.add_row(vec![
                Cell::new(&entity.text),
                Cell::new(&entity.label).fg(category_color(entity.category)),
            ]);
        }
        table
    }

    /// Top news sources, most prominent first.
    pub fn sources(&self, sources: &[&NewsSource]) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .apply_modifier(UTF8_SOLID_INNER_BORDERS)
            .set_content_arrangement(ContentArrangement::DynamicFullWidth)
            .set_width(140);
        if self.styled {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        table.set_header(vec![
            header_cell("#"),
            header_cell("Source"),
            header_cell("URL"),
            header_cell("Category"),
            header_cell("Priority"),
        ]);
        for (index, source) in sources.iter().enumerate() {
            table.add_row(vec![
                Cell::new(index + 1),
                Cell::new(&source.name).add_attribute(Attribute::Bold),
                Cell::new(&source.url),
                Cell::new(source.category.join(", ")),
                match source.priority {
                    Some(priority) => Cell::new(priority),
                    None => dim_cell("-"),
                },
            ]);
        }
        align_column(&mut table, 0, CellAlignment::Right);
        align_column(&mut table, 4, CellAlignment::Right);
        table.to_string()
    }

    /// One game round, items numbered from 0 as the vote expects.
    pub fn pair(&self, pair: &GamePair) -> String {
        let mut table = self.table();
        table.set_header(vec![
            header_cell("Choice"),
            header_cell("Type"),
            header_cell("Content"),
        ]);
        for (index, item) in pair.items.iter().enumerate() {
            let content = [&item.title, &item.excerpt, &item.url]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("\n");
            table.add_row(vec![
                Cell::new(index).add_attribute(Attribute::Bold),
                Cell::new(format!("{:?}", item.kind).to_lowercase()),
                Cell::new(content),
            ]);
        }
        align_column(&mut table, 0, CellAlignment::Center);
        format!("Pair {}\n{table}", pair.id)
    }

    pub fn answer(&self, answer: &GameAnswer, choice: Option<usize>) -> String {
        let mut out = String::new();
        match answer.answer_index {
            Some(index) => {
                let _ = writeln!(out, "Item {index} was the fake.");
            }
            None => {
                let _ = writeln!(out, "Neither item was fake.");
            }
        }
        if let Some(choice) = choice {
            let verdict = if answer.is_correct(choice) {
                "You spotted it."
            } else {
                "Not this time."
            };
            let _ = writeln!(out, "{verdict}");
        }
        let mut table = self.table();
        table.set_header(vec![header_cell("Item"), header_cell("Explanation")]);
        for (index, _) in answer.explanations.iter().enumerate() {
            let label = if answer.is_fake(index) {
                Cell::new(format!("{index} (fake)")).fg(Color::Red)
            } else {
                Cell::new(index)
            };
            table.add_row(vec![label, Cell::new(answer.explanation(index))]);
        }
        out.push_str(&table.to_string());
        out
    }
}

/// Colors verdict-like values; everything else is plain.
fn verdict_cell(value: &str) -> Cell {
    match value.trim().to_ascii_lowercase().as_str() {
        "real" | "likely true" => Cell::new(value).fg(Color::Green).add_attribute(Attribute::Bold),
        "fake" | "likely false" => Cell::new(value).fg(Color::Red).add_attribute(Attribute::Bold),
        _ => Cell::new(value),
    }
}

fn category_color(category: EntityCategory) -> Color {
    match category {
        EntityCategory::Person => Color::Blue,
        EntityCategory::Organization => Color::Magenta,
        EntityCategory::Location => Color::Green,
        EntityCategory::Date => Color::Yellow,
        EntityCategory::Time => Color::DarkYellow,
        EntityCategory::Money => Color::DarkGreen,
        EntityCategory::Percent => Color::Rgb {
            r: 236,
            g: 72,
            b: 153,
        },
        EntityCategory::Other => Color::Grey,
    }
}

/// Text bar for a 0-100 confidence.
pub fn meter(percent: f64) -> String {
    let clamped = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let filled = ((clamped / 100.0) * METER_WIDTH as f64).round() as usize;
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(METER_WIDTH - filled)
    )
}

/// Narrative sections as indented plain text.
pub fn narrative(sections: &[AnalysisSection]) -> String {
    let mut out = String::new();
    for section in sections {
        if let Some(heading) = &section.heading {
            let _ = writeln!(out, "{heading}");
        }
        for line in &section.content {
            let _ = writeln!(out, "  {}", line.trim_end());
        }
    }
    out
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn numbered_list(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| format!("{:>3}. {item}", index + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value)
        .fg(Color::DarkGrey)
        .add_attribute(Attribute::Dim)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
