use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use verne_app::books::client::{CatalogApi, HttpCatalogClient};
use verne_app::books::form::{BookInput, CreateBookForm, SubmitOutcome};
use verne_app::books::listing::ListingView;
use verne_app::books::models::Book;
use verne_authz::Availability;
use verne_kernel::settings::Settings;

/// Operator tool for the Verne catalog front-end.
#[derive(Debug, Parser)]
#[command(name = "verne", version, about)]
struct Cli {
    /// Catalog endpoint, overriding `catalog.endpoint` from the settings
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the web front-end
    Serve,
    /// Read or add catalog records
    Books {
        #[command(subcommand)]
        command: BooksCommand,
    },
    /// Print the effective settings as JSON
    Config,
}

#[derive(Debug, Subcommand)]
enum BooksCommand {
    /// Print one line per record
    List {
        /// Only show records whose title or author contains this text
        #[arg(long, short, default_value = "")]
        query: String,
    },
    /// Create a record, then print the refreshed catalog
    Add(AddArgs),
}

#[derive(Debug, Args)]
struct AddArgs {
    #[arg(long, default_value = "")]
    title: String,
    #[arg(long, default_value = "")]
    author: String,
    #[arg(long, default_value = "")]
    summary: String,
    #[arg(long, default_value = "")]
    year: String,
    #[arg(long, default_value = "")]
    isbn: String,
    #[arg(long, default_value = "")]
    publisher: String,
    #[arg(long, default_value = "")]
    category_id: String,
    #[arg(long, default_value = "available")]
    status: String,
}

impl From<AddArgs> for BookInput {
    fn from(args: AddArgs) -> Self {
        BookInput {
            title: args.title,
            author: args.author,
            summary: args.summary,
            year: args.year,
            isbn: args.isbn,
            publisher: args.publisher,
            category_id: args.category_id,
            status: args.status,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load Verne settings")?;
    if let Some(endpoint) = cli.endpoint {
        settings.catalog.endpoint = endpoint;
    }
    verne_telemetry::init(&settings.telemetry)?;

    tracing::debug!(env = ?settings.environment, command = ?cli.command, "verne cli starting");

    match cli.command {
        Command::Serve => verne_app::serve(&settings).await,
        Command::Config => {
            let rendered = serde_json::to_string_pretty(&settings)
                .context("failed to render settings")?;
            println!("{rendered}");
            Ok(())
        }
        Command::Books { command } => {
            let catalog = HttpCatalogClient::new(settings.catalog.endpoint.clone());
            match command {
                BooksCommand::List { query } => list_books(&catalog, &query).await,
                BooksCommand::Add(args) => add_book(&catalog, args).await,
            }
        }
    }
}

async fn list_books(catalog: &dyn CatalogApi, query: &str) -> anyhow::Result<()> {
    let mut listing = ListingView::new();
    listing.mount(catalog).await;
    print_books(listing.filtered(query));
    Ok(())
}

async fn add_book(catalog: &dyn CatalogApi, args: AddArgs) -> anyhow::Result<()> {
    if Availability::parse_lenient(&args.status) == Availability::Unknown {
        bail!("unknown status '{}'", args.status);
    }

    let mut form = CreateBookForm::with_input(args.into());
    let mut refresh_requested = false;
    let outcome = form.submit(catalog, || refresh_requested = true).await;

    match outcome {
        SubmitOutcome::Created(book) => {
            println!("created #{} {}", book.id, book.title);
        }
        SubmitOutcome::Invalid(message) => bail!(message),
        SubmitOutcome::Failed => bail!(form
            .error()
            .unwrap_or("the catalog did not accept the book")
            .to_string()),
    }

    if refresh_requested {
        let mut listing = ListingView::new();
        listing.refresh(catalog).await;
        print_books(listing.rows());
    }
    Ok(())
}

fn print_books<'a>(books: impl IntoIterator<Item = &'a Book>) {
    let mut count = 0usize;
    for book in books {
        count += 1;
        println!(
            "{}\t{}\t{}\t{}\t{}",
            book.id,
            book.title,
            book.author,
            book.year.map(|year| year.to_string()).unwrap_or_default(),
            book.status
        );
    }
    println!("{count} books");
}
