use crate::cli::commands::Commands;
use crate::cli::dispatch::AppContext;
use crate::config::parse_interval;
use crate::domain::User;
use crate::errors::{GatorError, GatorResult};
use crate::services::{FeedService, PollService, PostService, UserService};
use crate::sources::HttpFetcher;
use crate::storage::{
    SqliteFeedRepository, SqliteFollowRepository, SqlitePostRepository, SqliteUserRepository,
};

fn user_service(ctx: &AppContext) -> UserService<SqliteUserRepository> {
    UserService::new(SqliteUserRepository::new(ctx.storage.clone()))
}

fn feed_service(ctx: &AppContext) -> FeedService<SqliteFeedRepository, SqliteFollowRepository> {
    FeedService::new(
        SqliteFeedRepository::new(ctx.storage.clone()),
        SqliteFollowRepository::new(ctx.storage.clone()),
    )
}

fn wrong_command(handler: &str, command: &Commands) -> GatorError {
    GatorError::InvalidInput(format!(
        "'{}' handler cannot run '{}'",
        handler,
        command.name()
    ))
}

pub fn register(ctx: &mut AppContext, command: &Commands) -> GatorResult<()> {
    let Commands::Register { name } = command else {
        return Err(wrong_command("register", command));
    };

    let user = user_service(ctx).register(name)?;
    ctx.session.set_user(&user.name)?;

    println!("User '{}' created and logged in", user.name);
    println!("  ID: {}", user.id);
    println!("  Created: {}", user.created_at);
    Ok(())
}

pub fn login(ctx: &mut AppContext, command: &Commands) -> GatorResult<()> {
    let Commands::Login { name } = command else {
        return Err(wrong_command("login", command));
    };

    let user = user_service(ctx).get(name)?;
    ctx.session.set_user(&user.name)?;

    println!("user set to: '{}'", user.name);
    Ok(())
}

pub fn reset(ctx: &mut AppContext, command: &Commands) -> GatorResult<()> {
    if *command != Commands::Reset {
        return Err(wrong_command("reset", command));
    }

    user_service(ctx).reset()?;
    println!("All users, feeds and posts deleted.");
    Ok(())
}

pub fn users(ctx: &mut AppContext, command: &Commands) -> GatorResult<()> {
    if *command != Commands::Users {
        return Err(wrong_command("users", command));
    }

    let current = ctx.session.current_user_name();
    for user in user_service(ctx).list()? {
        if Some(user.name.as_str()) == current {
            println!("* {} (current)", user.name);
        } else {
            println!("* {}", user.name);
        }
    }
    Ok(())
}

pub fn agg(ctx: &mut AppContext, command: &Commands) -> GatorResult<()> {
    let Commands::Agg { interval } = command else {
        return Err(wrong_command("agg", command));
    };

    let interval = match interval {
        Some(raw) => parse_interval(raw)?,
        None => ctx.config.poll_interval,
    };

    let fetcher = HttpFetcher::new(ctx.config.request_timeout)?;
    let poller = PollService::new(
        SqliteFeedRepository::new(ctx.storage.clone()),
        SqlitePostRepository::new(ctx.storage.clone()),
        fetcher,
    );

    println!("Collecting feeds every {:?}", interval);
    poller.run(interval)
}

pub fn feeds(ctx: &mut AppContext, command: &Commands) -> GatorResult<()> {
    if *command != Commands::Feeds {
        return Err(wrong_command("feeds", command));
    }

    let listings = feed_service(ctx).list()?;
    if listings.is_empty() {
        println!("No feeds added yet.");
        return Ok(());
    }

    for (i, listing) in listings.iter().enumerate() {
        println!("{}) Feed: {}", i + 1, listing.feed.name);
        println!(" - URL: {}", listing.feed.url);
        println!(" - User: {}", listing.owner_name);
        println!();
    }
    Ok(())
}

pub fn add_feed(ctx: &mut AppContext, command: &Commands, user: &User) -> GatorResult<()> {
    let Commands::AddFeed { name, url } = command else {
        return Err(wrong_command("addfeed", command));
    };

    let feed = feed_service(ctx).add(user, name, url)?;

    println!("Feed added successfully!");
    println!("  Name: {}", feed.name);
    println!("  URL: {}", feed.url);
    println!("User '{}' is now following feed '{}'", user.name, feed.name);
    Ok(())
}

pub fn follow(ctx: &mut AppContext, command: &Commands, user: &User) -> GatorResult<()> {
    let Commands::Follow { url } = command else {
        return Err(wrong_command("follow", command));
    };

    let feed = feed_service(ctx).follow(user, url)?;
    println!("User '{}' is now following feed '{}'", user.name, feed.name);
    Ok(())
}

pub fn following(ctx: &mut AppContext, command: &Commands, user: &User) -> GatorResult<()> {
    if *command != Commands::Following {
        return Err(wrong_command("following", command));
    }

    println!("Feeds followed by {}:", user.name);
    for followed in feed_service(ctx).following(user)? {
        println!("* {}", followed.feed_name);
    }
    Ok(())
}

pub fn unfollow(ctx: &mut AppContext, command: &Commands, user: &User) -> GatorResult<()> {
    let Commands::Unfollow { url } = command else {
        return Err(wrong_command("unfollow", command));
    };

    let followed = feed_service(ctx).unfollow(user, url)?;
    println!("User '{}' unfollowed feed '{}'", user.name, followed.feed_name);
    Ok(())
}

pub fn browse(ctx: &mut AppContext, command: &Commands, user: &User) -> GatorResult<()> {
    let Commands::Browse { limit } = command else {
        return Err(wrong_command("browse", command));
    };

    let posts = PostService::new(SqlitePostRepository::new(ctx.storage.clone()))
        .browse(user, *limit)?;

    if posts.is_empty() {
        println!("No posts yet. Follow some feeds and run 'agg'.");
        return Ok(());
    }

    for (i, post) in posts.iter().enumerate() {
        println!("Post {}", i + 1);
        println!("{}", post.title);
        println!("  Published: {}", post.published_at.format("%Y-%m-%d %H:%M"));
        println!("{}", post.description);
        println!("{}", post.url);
        println!();
    }
    Ok(())
}
