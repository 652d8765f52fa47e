//! Horizon Tabular Catalog Browser Example
//!
//! Console walkthrough of a training-catalog list screen: load records,
//! sort by header, filter by column value, page through the results and
//! drive the per-row selection, printing the table after each step.
//!
//! Run with: cargo run -p horizon-tabular --example catalog_browser

use horizon_tabular::{Record, Schema, SortOrder, TableController, Value};

fn catalog_schema() -> Schema {
    Schema::from_pairs([
        ("Thème", "theme"),
        ("Statut", "status"),
        ("Durée (h)", "duration"),
        ("Actions", "actions"),
        ("Sélection", "selection"),
    ])
}

fn catalog_records() -> Vec<Record> {
    [
        ("Sécurité au travail", "Actif", 7),
        ("Accueil des nouveaux", "Inactif", 2),
        ("Budget prévisionnel", "Actif", 3),
        ("Éthique professionnelle", "Actif", 5),
        ("Conformité RGPD", "Inactif", 4),
        ("Droit du travail", "Actif", 6),
        ("Évaluation annuelle", "Inactif", 1),
        ("Gestion du stress", "Actif", 2),
        ("10 gestes qui sauvent", "Actif", 1),
        ("2 minutes pour convaincre", "Actif", 1),
    ]
    .into_iter()
    .map(|(theme, status, duration)| {
        Record::new()
            .with("theme", theme)
            .with("status", status)
            .with("duration", i64::from(duration))
    })
    .collect()
}

/// Render the current page as a fixed-width text table.
fn print_table(controller: &TableController) {
    let headers = controller.visible_headers();
    let page = controller.page_slice();

    // Column widths from header and cell text, counted in characters.
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    let cell = |record: &Record, header: &str| -> String {
        match controller.schema().key_for(header) {
            Some(key) => record.get_or_null(key).to_string(),
            None => String::new(),
        }
    };
    for record in page {
        for (i, header) in headers.iter().enumerate() {
            widths[i] = widths[i].max(cell(record, header).chars().count());
        }
    }

    let row_line = |cells: Vec<String>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(text, width)| {
                let pad = width - text.chars().count();
                format!("{text}{}", " ".repeat(pad))
            })
            .collect();
        println!("| {} |", padded.join(" | "));
    };

    row_line(headers.iter().map(|h| h.to_string()).collect());
    row_line(widths.iter().map(|w| "-".repeat(*w)).collect());
    for record in page {
        row_line(headers.iter().map(|h| cell(record, h)).collect());
    }
    println!(
        "page {}/{} ({} records)\n",
        controller.current_page(),
        controller.total_pages(),
        controller.total_records()
    );
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Horizon Tabular: catalog browser ===\n");

    let mut controller = TableController::with_locale(catalog_schema(), 4, "fr-FR")
        .expect("page size is positive");

    // Watch the state move.
    controller.table().page_changed.connect(|page: &usize| {
        println!(">> page changed to {page}");
    });
    controller.filter().filter_changed.connect(|header: &String| {
        println!(">> filter changed on {header:?}");
    });
    controller
        .selection()
        .selection_changed
        .connect(|(selected, deselected): &(Vec<usize>, Vec<usize>)| {
            println!(">> selection +{selected:?} -{deselected:?}");
        });

    println!("-- load ------------------------------------------------");
    controller.set_records(catalog_records());
    print_table(&controller);

    println!("-- sort by Thème, ascending ----------------------------");
    controller
        .sort_by("Thème", SortOrder::Ascending)
        .expect("Thème is a sortable column");
    print_table(&controller);

    println!("-- filter Statut to Actif ------------------------------");
    controller.toggle_filter_value("Statut", Value::from("Actif"));
    print_table(&controller);

    println!("-- next page -------------------------------------------");
    controller.set_current_page(2);
    print_table(&controller);

    println!("-- select the whole page -------------------------------");
    controller.select_page(true);
    for record in controller.selected_records() {
        println!("   selected: {}", record.get_or_null("theme"));
    }
    println!();

    println!("-- clear filters ---------------------------------------");
    controller.clear_filters();
    print_table(&controller);

    println!("-- distinct values for the Statut filter widget --------");
    for value in controller.distinct_values("Statut") {
        let checked = controller.is_filter_selected("Statut", value);
        println!("   [{}] {value}", if checked { "x" } else { " " });
    }
}
