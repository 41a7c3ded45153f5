use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "vetrina-cli",
    version,
    about = "Authoring and reading client for a vetrina site"
)]
pub struct Cli {
    /// Base URL of the site, e.g. http://127.0.0.1:3000
    #[arg(long = "site", env = "VETRINA_SITE_URL", value_name = "URL")]
    pub site: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compose and submit a new post.
    Compose(ComposeArgs),
    /// Fetch the listing page and filter it locally.
    List(ListArgs),
    /// Read one post; registers a view once the page has loaded.
    Read(ReadArgs),
}

#[derive(Debug, Args, Default)]
pub struct ComposeArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Cover image URL.
    #[arg(long)]
    pub image: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// A content section as `kind:value`, in reading order. `value` is the
    /// text for text/code sections and the URL for image/video sections.
    /// May be repeated.
    #[arg(long = "section", value_name = "KIND:VALUE")]
    pub sections: Vec<String>,

    /// Skip the confirmation prompt.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub yes: bool,
}

#[derive(Debug, Args, Default)]
pub struct ListArgs {
    /// Case-insensitive search over titles and content.
    #[arg(long)]
    pub search: Option<String>,

    /// Category to filter by; "All" clears the filter.
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Post id.
    pub id: i64,
}
