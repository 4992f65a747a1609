use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

use medivision_core::modules::load_config;
use medivision_core::pipeline::prompt::{EXAMPLE_TEMPLATES, PROMPT_STYLES, REGENERATION_OPTIONS};
use medivision_types::models::{language_code, MODEL_CATALOG, SUPPORTED_LANGUAGES};

pub fn list_models() -> Result<()> {
    let default_model = load_config().map(|c| c.default_model).unwrap_or_default();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Model", "Id", "Max Tokens", "Description"]);

    for spec in MODEL_CATALOG {
        let name = if spec.display_name == default_model {
            Cell::new(format!("{} (default)", spec.display_name)).fg(Color::Green)
        } else {
            Cell::new(spec.display_name)
        };
        table.add_row(vec![
            name,
            Cell::new(spec.id),
            Cell::new(spec.max_tokens),
            Cell::new(spec.description),
        ]);
    }

    println!("{table}");
    Ok(())
}

pub fn list_languages() -> Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Language", "Title Tag"]);
    for language in SUPPORTED_LANGUAGES {
        table.add_row(vec![Cell::new(language), Cell::new(language_code(language))]);
    }
    println!("{table}");
    Ok(())
}

pub fn list_styles() -> Result<()> {
    println!("{}", "Prompt styles:".cyan().bold());
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Style", "Description"]);
    for style in PROMPT_STYLES {
        table.add_row(vec![Cell::new(style.name), Cell::new(style.description)]);
    }
    println!("{table}");

    println!("\n{}", "Regeneration options:".cyan().bold());
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["", "Option", "Instruction"]);
    for option in REGENERATION_OPTIONS {
        table.add_row(vec![Cell::new(option.emoji), Cell::new(option.name), Cell::new(option.instruction)]);
    }
    println!("{table}");
    Ok(())
}

pub fn list_templates() -> Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["", "Template", "Category", "Query"]);
    for template in EXAMPLE_TEMPLATES {
        table.add_row(vec![
            Cell::new(template.icon),
            Cell::new(template.name),
            Cell::new(template.category),
            Cell::new(template.text),
        ]);
    }
    println!("{table}");
    Ok(())
}
