use std::io::{self, Write};

use vetrina::application::drafts::{PostDraft, SectionField};
use vetrina::application::listing::FilterState;
use vetrina::application::viewing::ViewLatch;
use vetrina::domain::entities::PostWithSections;
use vetrina::domain::types::SectionKind;

use crate::args::{ComposeArgs, ListArgs, ReadArgs};
use crate::client::{CliError, Ctx};

pub async fn compose(ctx: &Ctx, args: ComposeArgs) -> Result<(), CliError> {
    let draft = build_draft(&args)?;

    if !args.yes && !confirm("Create this post?")? {
        println!("cancelled; nothing was submitted");
        return Ok(());
    }

    match ctx.create_post(&draft.to_command()).await {
        Ok(post) => {
            println!(
                "created post {} ({} section{})",
                post.id,
                post.content_sections.len(),
                if post.content_sections.len() == 1 {
                    ""
                } else {
                    "s"
                }
            );
            // Land on the listing, like the web form does after a create.
            // The listing may still show the pre-create page until it
            // revalidates; the create itself already succeeded.
            if let Err(err) = list(ctx, ListArgs::default()).await {
                eprintln!("listing unavailable: {err}");
            }
            Ok(())
        }
        Err(err) => {
            // The draft is built from the arguments alone; nothing was
            // stored, so re-running the same command retries it as-is.
            eprintln!("submission failed; your draft was not stored");
            Err(err)
        }
    }
}

pub async fn list(ctx: &Ctx, args: ListArgs) -> Result<(), CliError> {
    let page = ctx.list_page().await?;

    let mut filter = FilterState::default();
    if let Some(category) = &args.category {
        filter.select_category(category);
    }
    if let Some(search) = &args.search {
        filter.set_search(search);
    }

    let posts: Vec<PostWithSections> = page.posts.into_iter().map(Into::into).collect();
    let matched = filter.apply(&posts);

    println!("categories: {}", page.categories.join(", "));
    for entry in &matched {
        println!(
            "#{:<4} [{}] {} ({} views)",
            entry.post.id, entry.post.category, entry.post.title, entry.post.views
        );
    }
    println!("{} of {} posts", matched.len(), posts.len());

    let query = filter.to_query();
    if !query.is_empty() {
        println!("share: /blog?{query}");
    }
    Ok(())
}

pub async fn read(ctx: &Ctx, args: ReadArgs) -> Result<(), CliError> {
    let Some(page) = ctx.detail_page(args.id).await? else {
        println!("post {} not found", args.id);
        return Ok(());
    };

    let post = &page.post;
    println!("{}\n{}\n", post.title, post.description);
    for section in &post.content_sections {
        let number = section.order + 1;
        match section.kind {
            SectionKind::Text | SectionKind::Code => {
                println!("{number}. {}", section.content.as_deref().unwrap_or_default());
            }
            SectionKind::Image | SectionKind::Video => {
                println!(
                    "{number}. [{}] {}",
                    section.kind.as_str(),
                    section.src.as_deref().unwrap_or_default()
                );
            }
        }
    }

    // The page is fully loaded and resolved; count the visit exactly once.
    // Failure here must not spoil the read.
    let mut latch = ViewLatch::new();
    if latch.should_fire(true) {
        match ctx.increment_views(post.id).await {
            Ok(views) => println!("\n{views} views"),
            Err(err) => eprintln!("\nview count unavailable: {err}"),
        }
    }
    Ok(())
}

fn build_draft(args: &ComposeArgs) -> Result<PostDraft, CliError> {
    let mut draft = PostDraft {
        title: args.title.clone(),
        content: args.content.clone().unwrap_or_default(),
        description: args.description.clone().unwrap_or_default(),
        image: args.image.clone().unwrap_or_default(),
        category: args.category.clone().unwrap_or_default(),
        ..PostDraft::default()
    };

    for (index, spec) in args.sections.iter().enumerate() {
        if index > 0 {
            draft.add_section();
        }
        let (kind, value) = spec.split_once(':').ok_or_else(|| {
            CliError::InvalidInput(format!(
                "section `{spec}` must look like kind:value (e.g. text:hello)"
            ))
        })?;

        draft
            .update_section(index, SectionField::Kind, kind)
            .map_err(|err| CliError::InvalidInput(err.to_string()))?;

        let field = if draft.sections[index].kind.uses_content() {
            SectionField::Content
        } else {
            SectionField::Src
        };
        draft
            .update_section(index, field, value)
            .map_err(|err| CliError::InvalidInput(err.to_string()))?;
    }

    Ok(draft)
}

fn confirm(prompt: &str) -> Result<bool, CliError> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "Yes" | "YES"))
}
