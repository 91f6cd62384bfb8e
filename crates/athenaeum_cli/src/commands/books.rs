//! BOOKS command - browse and curate the catalog.

use anyhow::{anyhow, Result};
use athenaeum_core::{
    sort_books, AdminSortField, Book, BookDraft, CatalogSortField, Discipline, DisciplineFilter,
    SortOrder, NO_DOCUMENT,
};
use clap::{Args, Subcommand};
use serde::Serialize;

use super::{excerpt, output, Context, HumanReadable};

/// Arguments for the books command.
#[derive(Args)]
pub struct BooksArgs {
    #[command(subcommand)]
    pub command: BooksCommand,
}

#[derive(Subcommand)]
pub enum BooksCommand {
    /// Public catalog, optionally filtered by discipline and text
    List {
        /// Discipline name or `all`
        #[arg(long, short = 'd')]
        discipline: Option<DisciplineFilter>,

        /// Matches title, author, or discipline
        #[arg(long, short = 's', default_value = "")]
        search: String,

        /// title|author|createdAt; stored order when omitted
        #[arg(long)]
        sort: Option<CatalogSortField>,

        /// asc|desc
        #[arg(long)]
        order: Option<SortOrder>,
    },

    /// Curator listing searched by title or author
    Admin {
        #[arg(long, short = 's', default_value = "")]
        search: String,

        /// title|author|createdAt|category
        #[arg(long)]
        sort: Option<AdminSortField>,

        /// asc|desc
        #[arg(long)]
        order: Option<SortOrder>,
    },

    /// Show one book
    Show { id: String },

    /// Add a book (curator)
    Add(AddArgs),

    /// Delete a book by id (curator)
    Delete { id: String },

    /// Overwrite the catalog with the built-in collection (curator)
    Reset,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub author: String,

    #[arg(long, short = 'd')]
    pub discipline: Discipline,

    #[arg(long, default_value = "")]
    pub category: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Cover image URL; generated when omitted
    #[arg(long, default_value = "")]
    pub cover_url: String,

    /// Document URL or `data:application/pdf;base64,...`
    #[arg(long, default_value = NO_DOCUMENT)]
    pub file_url: String,
}

/// A list of books as rendered by `list` and `admin`.
#[derive(Debug, Serialize)]
#[serde(transparent)]
struct BookList(Vec<Book>);

impl HumanReadable for BookList {
    fn print_human(&self) {
        if self.0.is_empty() {
            println!("  (No volumes match)");
            return;
        }
        for book in &self.0 {
            println!(
                "{:<34} {:<28} {:<15} {}",
                excerpt(&book.title, 32),
                excerpt(&book.author, 26),
                book.discipline,
                book.id
            );
        }
        println!();
        println!("{} volume(s)", self.0.len());
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct BookDetail(Book);

impl HumanReadable for BookDetail {
    fn print_human(&self) {
        let book = &self.0;
        println!("{}", book.title);
        println!("  by {}", book.author);
        println!();
        println!("  ID:         {}", book.id);
        println!("  Discipline: {}", book.discipline);
        if !book.category.is_empty() {
            println!("  Category:   {}", book.category);
        }
        println!("  Cover:      {}", excerpt(&book.cover_url, 60));
        println!("  Document:   {}", excerpt(&book.file_url, 60));
        println!("  Added:      {} ms", book.created_at);
        if !book.description.is_empty() {
            println!();
            println!("  {}", book.description);
        }
    }
}

#[derive(Debug, Serialize)]
struct Deleted {
    id: String,
}

impl HumanReadable for Deleted {
    fn print_human(&self) {
        println!("Removed `{}` from the archive.", self.id);
    }
}

/// Execute the books command.
pub fn execute(ctx: &Context<'_>, args: BooksArgs) -> Result<()> {
    let archive = ctx.archive();

    match args.command {
        BooksCommand::List {
            discipline,
            search,
            sort,
            order,
        } => {
            let books = archive.catalog(discipline.unwrap_or_default(), &search)?;
            let books = match sort {
                Some(field) => sort_books(&books, field, order.unwrap_or_default()),
                None => books,
            };
            output(&BookList(books), ctx.json)
        }
        BooksCommand::Admin {
            search,
            sort,
            order,
        } => {
            ctx.require_curator("books admin")?;
            let books = archive.admin_listing(
                &search,
                sort.unwrap_or_default(),
                order.unwrap_or_default(),
            )?;
            output(&BookList(books), ctx.json)
        }
        BooksCommand::Show { id } => {
            let book = archive
                .store()
                .get_book(&id)?
                .ok_or_else(|| anyhow!("no book with id `{id}`"))?;
            output(&BookDetail(book), ctx.json)
        }
        BooksCommand::Add(add) => {
            let draft = BookDraft {
                category: add.category,
                description: add.description,
                cover_url: add.cover_url,
                file_url: add.file_url,
                ..BookDraft::new(add.title, add.author, add.discipline)
            };
            let book = archive.add_book(&ctx.session, draft)?;
            output(&BookDetail(book), ctx.json)
        }
        BooksCommand::Delete { id } => {
            archive.delete_book(&ctx.session, &id)?;
            output(&Deleted { id }, ctx.json)
        }
        BooksCommand::Reset => {
            ctx.require_curator("books reset")?;
            let books = archive.store().reset_to_seed()?;
            output(&BookList(books), ctx.json)
        }
    }
}
