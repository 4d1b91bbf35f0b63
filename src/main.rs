// Console front end for the training calendar dashboard.
//
// - Option [1] loads the CSV and prints load diagnostics.
// - Option [2] shows KPIs, charts-as-tables and the current page.
// - Options [3]-[6] change the filter or the page.
// - Option [7] writes the CSV, XLSX and JSON exports.
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};
use training_dashboard::config::AppConfig;
use training_dashboard::export::ExportLayout;
use training_dashboard::filter::{filter_options, Dimension};
use training_dashboard::output;
use training_dashboard::util::{format_compact, format_int};
use training_dashboard::{loader, Dashboard, DashboardError, Record};

// Records are loaded once; filter and page live next to them so every
// menu action recomputes from the same state.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState::default()));

#[derive(Default)]
struct AppState {
    data: Option<Vec<Record>>,
    dashboard: Dashboard,
}

fn app_state() -> MutexGuard<'static, AppState> {
    APP_STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn handle_load(config: &AppConfig) {
    match loader::load_records(&config.data_path) {
        Ok((data, report)) => {
            println!(
                "Processing dataset... ({} rows read, {} loaded)",
                format_int(report.total_rows as u64),
                format_int(report.loaded_rows as u64)
            );
            if report.parse_errors > 0 {
                println!(
                    "Note: {} rows skipped due to parse/validation errors.",
                    format_int(report.parse_errors as u64)
                );
            }
            if report.missing_work_team > 0 {
                println!(
                    "Note: {} rows have no work team and are left out of the Tim Kerja view.",
                    format_int(report.missing_work_team as u64)
                );
            }
            println!();
            let mut state = app_state();
            state.dashboard.clamp_page(&data);
            state.data = Some(data);
        }
        Err(e) => {
            log::error!("failed to load {}: {}", config.data_path.display(), e);
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

fn handle_show() -> Result<(), DashboardError> {
    let state = app_state();
    let data = state.data.as_deref().ok_or(DashboardError::NoData)?;
    let dashboard = &state.dashboard;
    let view = dashboard.view(data);
    let layout = ExportLayout::for_extra(dashboard.extra());

    println!(
        "\nDashboard Kalender Pembelajaran {} ({} hasil)",
        dashboard.year(),
        format_int(view.filtered.len() as u64)
    );
    println!(
        "Total Peserta: {} | Total Jamlat: {} | Total Pelatihan: {}",
        format_compact(view.kpis.participants),
        format_compact(view.kpis.hours),
        format_compact(view.kpis.programs as u64)
    );

    output::preview_table("Peserta per Bulan", None, &view.monthly);
    output::preview_table("Distribusi Metode Pembelajaran", None, &view.breakdowns.by_method);
    output::preview_table("Distribusi Rumpun Pelatihan", None, &view.breakdowns.by_category);
    output::preview_table("Peserta per Penyelenggara", Some("Ranked"), &view.breakdowns.by_provider);
    if !view.breakdowns.by_work_team.is_empty() {
        output::preview_table("Peserta per Tim Kerja", Some("Ranked"), &view.breakdowns.by_work_team);
    }
    output::preview_table(
        "Analisis Musim",
        Some("Heuristic: 1.2x / 0.8x of the mean over active months"),
        &view.seasons.months,
    );

    println!("Data Program Pelatihan");
    println!("{}", output::render_page(&view, layout));
    println!("{}\n", view.page.label());
    Ok(())
}

fn pick_dimension() -> Option<Dimension> {
    println!("[1] Bulan  [2] Penyelenggara  [3] Metode  [4] Extra");
    match read_line("Dimension: ").as_str() {
        "1" => Some(Dimension::Month),
        "2" => Some(Dimension::Provider),
        "3" => Some(Dimension::Method),
        "4" => Some(Dimension::Extra),
        _ => None,
    }
}

fn handle_set_filter() -> Result<(), DashboardError> {
    let Some(dim) = pick_dimension() else {
        println!("Invalid dimension.\n");
        return Ok(());
    };
    let mut state = app_state();
    let AppState { data, dashboard } = &mut *state;
    let data = data.as_deref().ok_or(DashboardError::NoData)?;

    let options = filter_options(dim, dashboard.extra(), data);
    for (i, opt) in options.iter().enumerate() {
        println!("[{}] {}", i, opt.label);
    }
    let choice = read_line("Option: ");
    match choice.parse::<usize>().ok().and_then(|i| options.get(i)) {
        Some(opt) => {
            dashboard.set_filter(dim, &opt.value);
            println!("Filter set: {}\n", opt.label);
        }
        None => println!("Invalid option.\n"),
    }
    Ok(())
}

fn handle_page(forward: bool) -> Result<(), DashboardError> {
    let mut state = app_state();
    let AppState { data, dashboard } = &mut *state;
    let data = data.as_deref().ok_or(DashboardError::NoData)?;
    let before = dashboard.view(data).page;
    if forward && !before.has_next() {
        println!("Already on the last page.");
    } else if !forward && !before.has_prev() {
        println!("Already on the first page.");
    } else if forward {
        dashboard.next_page(data);
    } else {
        dashboard.prev_page();
    }
    println!("{}\n", dashboard.view(data).page.label());
    Ok(())
}

fn handle_export(config: &AppConfig) -> Result<(), DashboardError> {
    let state = app_state();
    let data = state.data.as_deref().ok_or(DashboardError::NoData)?;
    let table = state.dashboard.export(data);

    std::fs::create_dir_all(&config.output_dir)?;
    config.check_export_targets()?;
    let csv_path = config.csv_export_path();
    output::write_export_csv(&csv_path, &table)?;
    let xlsx_path = config.xlsx_export_path();
    output::write_export_xlsx(&xlsx_path, &table)?;
    let summary_path = config.summary_path();
    output::write_json(&summary_path, &state.dashboard.summary(data))?;

    println!("Exported {} rows:", format_int(table.len() as u64));
    println!("  {}", csv_path.display());
    println!("  {}", xlsx_path.display());
    println!("  {}\n", summary_path.display());
    Ok(())
}

fn report(result: Result<(), DashboardError>) {
    if let Err(e) = result {
        eprintln!("Error: {}\n", e);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();
    dotenv::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    log::info!("data: {}", config.data_path.display());
    log::info!("output: {}", config.output_dir.display());
    app_state().dashboard = Dashboard::new(config.extra.clone(), config.year, config.page_size);

    loop {
        println!("Dashboard Kalender Pembelajaran {}", config.year);
        println!("[1] Load the file");
        println!("[2] Show dashboard");
        println!("[3] Set filter");
        println!("[4] Reset filters");
        println!("[5] Next page");
        println!("[6] Previous page");
        println!("[7] Export CSV / Excel / summary");
        println!("[0] Exit\n");
        match read_line("Enter choice: ").as_str() {
            "1" => handle_load(&config),
            "2" => report(handle_show()),
            "3" => report(handle_set_filter()),
            "4" => {
                app_state().dashboard.reset_filters();
                println!("Filters cleared.\n");
            }
            "5" => report(handle_page(true)),
            "6" => report(handle_page(false)),
            "7" => report(handle_export(&config)),
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 0-7.\n"),
        }
    }
}
