use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use walletline::api::{ClientError, HttpApiClient, TransactionApi};
use walletline::config::{AppPaths, Settings};
use walletline::display::{format_category_list, format_date_label, format_issues, format_record};
use walletline::draft::{AmountEdit, DraftEngine};
use walletline::models::{Category, PaymentMethod, TransactionKind, TransactionRecord};
use walletline::presentation::{PersistOutcome, PresentationContext, Theme};
use walletline::storage::JsonPreferenceStore;
use walletline::{logging, Locale, LocaleTable, WalletError};

#[derive(Parser)]
#[command(
    name = "walletline",
    version,
    about = "Personal-finance transaction entry from the terminal",
    long_about = "Walletline composes transactions through the same draft engine and \
                  presentation context the mobile screens use, then submits them to \
                  the finance API."
)]
struct Cli {
    /// Data directory (defaults to the platform config directory)
    #[arg(long, global = true, env = "WALLETLINE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Override the API base URL from settings
    #[arg(long, global = true, env = "WALLETLINE_API_URL")]
    api_url: Option<String>,

    /// Bearer token for the API
    #[arg(long, global = true, env = "WALLETLINE_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

#[derive(Subcommand)]
enum Commands {
    /// Show active theme, locale and palette
    Prefs,

    /// Change the color theme
    Theme {
        #[arg(value_enum)]
        choice: ThemeChoice,
    },

    /// List available locales, or switch to one
    Locale {
        /// Locale code (en, ru, kz)
        code: Option<String>,
    },

    /// Print a translated string in the active locale
    Translate { namespace: String, key: String },

    /// List categories for a transaction kind
    Categories {
        /// expense or income (both when omitted)
        #[arg(short, long)]
        kind: Option<TransactionKind>,
    },

    /// Compose and submit a transaction
    #[command(alias = "txn")]
    Add {
        /// Amount, e.g. 12.50 or 12,50
        #[arg(short, long)]
        amount: String,
        /// expense or income
        #[arg(short, long, default_value = "expense")]
        kind: TransactionKind,
        /// Category identifier (see `walletline categories`)
        #[arg(short, long)]
        category: Option<Category>,
        /// cash or card
        #[arg(short, long)]
        method: Option<PaymentMethod>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Free-form note
        #[arg(short, long)]
        note: Option<String>,
        /// Mark as recurring
        #[arg(short, long)]
        recurring: bool,
        /// Print the record instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show current configuration and paths
    Config,
}

/// Prints the record to stdout instead of posting it
struct DryRunApi;

impl TransactionApi for DryRunApi {
    fn submit_transaction(&self, record: &TransactionRecord) -> Result<(), ClientError> {
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| ClientError::Server(e.to_string()))?;
        println!("{}", json);
        Ok(())
    }
}

type Context = PresentationContext<JsonPreferenceStore>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let paths = match &cli.data_dir {
        Some(dir) => AppPaths::with_base_dir(dir.clone()),
        None => AppPaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(url) = &cli.api_url {
        settings.api_base_url = url.clone();
    }

    let store = JsonPreferenceStore::new(paths.preferences_file());
    let mut ctx = PresentationContext::initialize(store, LocaleTable::bundled()?);
    ctx.subscribe(|change| debug!(?change, "presentation changed"));

    match cli.command {
        Some(Commands::Prefs) => show_prefs(&ctx, &paths),
        Some(Commands::Theme { choice }) => {
            let outcome = match choice {
                ThemeChoice::Light => ctx.set_theme(Theme::Light),
                ThemeChoice::Dark => ctx.set_theme(Theme::Dark),
                ThemeChoice::Toggle => ctx.toggle_theme(),
            };
            report_persist(&ctx, &outcome);
            println!(
                "{}: {}",
                ctx.translate("settings", "theme"),
                ctx.translate("theme", ctx.theme().as_str())
            );
        }
        Some(Commands::Locale { code: None }) => {
            for locale in ctx.table().locales() {
                let marker = if locale == ctx.locale() { "*" } else { " " };
                println!("{} {:<4} {}", marker, locale, ctx.table().language_name(locale));
            }
        }
        Some(Commands::Locale { code: Some(code) }) => match ctx.set_locale(Locale::new(&code)) {
            Ok(outcome) => {
                report_persist(&ctx, &outcome);
                println!(
                    "{}: {}",
                    ctx.translate("settings", "language"),
                    ctx.table().language_name(ctx.locale())
                );
            }
            Err(WalletError::UnknownLocale(code)) => {
                bail!("{}: {}", ctx.translate("settings", "unknown_locale"), code);
            }
            Err(e) => return Err(e.into()),
        },
        Some(Commands::Translate { namespace, key }) => {
            println!("{}", ctx.translate(&namespace, &key));
        }
        Some(Commands::Categories { kind }) => {
            let kinds = match kind {
                Some(kind) => vec![kind],
                None => vec![TransactionKind::Expense, TransactionKind::Income],
            };
            for kind in kinds {
                print!("{}", format_category_list(kind, ctx.table(), ctx.locale()));
            }
        }
        Some(Commands::Add {
            amount,
            kind,
            category,
            method,
            date,
            note,
            recurring,
            dry_run,
        }) => {
            let input = AddInput {
                amount,
                kind,
                category,
                method,
                date,
                note,
                recurring,
            };
            if dry_run {
                add_transaction(&ctx, &settings, input, &DryRunApi)?;
            } else {
                let mut client = HttpApiClient::new(
                    &settings.api_base_url,
                    Duration::from_secs(settings.request_timeout_secs),
                )?;
                if let Some(token) = &cli.token {
                    client = client.with_token(token);
                }
                add_transaction(&ctx, &settings, input, &client)?;
            }
        }
        Some(Commands::Config) => {
            println!("Walletline Configuration");
            println!("========================");
            println!("Data directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Preferences file: {}", paths.preferences_file().display());
            println!();
            println!("Settings:");
            println!("  API base URL:     {}", settings.api_base_url);
            println!("  Request timeout:  {}s", settings.request_timeout_secs);
            println!("  Date picker:      {}", settings.date_picker);
            println!("  Currency symbol:  {}", settings.currency_symbol);
        }
        None => {
            println!("Walletline - transaction entry for your finance account");
            println!();
            println!("Run 'walletline --help' for usage information.");
        }
    }

    Ok(())
}

fn show_prefs(ctx: &Context, paths: &AppPaths) {
    let palette = ctx.palette();
    println!("{:<10} {}", "theme", ctx.theme());
    println!("{:<10} {} ({})", "locale", ctx.locale(), ctx.table().language_name(ctx.locale()));
    println!("{:<10} {}", "background", palette.background);
    println!("{:<10} {}", "text", palette.text);
    println!("{:<10} {}", "accent", palette.accent);
    println!("{:<10} {}", "income", palette.income);
    println!("{:<10} {}", "expense", palette.expense);
    println!("{:<10} {}", "stored in", paths.preferences_file().display());
}

fn report_persist(ctx: &Context, outcome: &PersistOutcome) {
    if outcome.is_failed() {
        eprintln!("{}", ctx.translate("settings", "not_persisted"));
    }
}

struct AddInput {
    amount: String,
    kind: TransactionKind,
    category: Option<Category>,
    method: Option<PaymentMethod>,
    date: Option<NaiveDate>,
    note: Option<String>,
    recurring: bool,
}

fn add_transaction<A: TransactionApi>(
    ctx: &Context,
    settings: &Settings,
    input: AddInput,
    api: &A,
) -> Result<()> {
    let mut engine = DraftEngine::new(settings.date_picker);

    if let AmountEdit::Rejected(reason) = engine.set_amount(&input.amount) {
        bail!("{}: {}", ctx.translate("transactions", "amount"), reason);
    }
    engine.set_kind(input.kind);
    if let Some(category) = input.category {
        engine.set_category(category)?;
    }
    if let Some(method) = input.method {
        engine.set_payment_method(method);
    }
    if let Some(date) = input.date {
        engine.begin_date_selection();
        engine.on_date_changed(date);
        engine.confirm_date();
    }
    if let Some(note) = input.note {
        engine.set_note(note);
    }
    if input.recurring {
        engine.toggle_recurring();
    }

    let validation = engine.validate();
    if !validation.is_submittable() {
        let messages = format_issues(validation.issues(), ctx.table(), ctx.locale());
        bail!(
            "{}:\n  {}",
            ctx.translate("validation", "not_submittable"),
            messages.join("\n  ")
        );
    }

    debug!(
        date = %format_date_label(engine.draft().occurred_on(), engine.today(), ctx.table(), ctx.locale()),
        "submitting draft"
    );

    let today = engine.today();
    match engine.submit(api) {
        Ok(record) => {
            eprintln!("{}", ctx.translate("transactions", "submitted"));
            eprint!(
                "{}",
                format_record(&record, today, &settings.currency_symbol, ctx.table(), ctx.locale())
            );
            Ok(())
        }
        Err(WalletError::Api(e)) => {
            bail!("{}: {}", ctx.translate("transactions", "submit_failed"), e)
        }
        Err(e) => Err(e.into()),
    }
}
