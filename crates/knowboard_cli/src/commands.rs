//! Command handlers. Each maps to one board service entry point.

use crate::cli::{Command, EditSubtopicArgs, EditTopicArgs};
use anyhow::{bail, Context, Result};
use knowboard_core::{
    core_version, parse_tags, BoardService, IconKind, IdGenerator, KvStore, SubtopicPatch, Topic,
    TopicPatch, EXPORT_FILE_NAME,
};
use log::{error, info};
use std::fs;
use std::path::Path;

/// Runs one subcommand, emitting a `cli_command` event with its outcome.
pub fn run<S: KvStore, G: IdGenerator>(
    board: &mut BoardService<S, G>,
    command: Command,
) -> Result<()> {
    let name = command.name();
    match execute(board, command) {
        Ok(()) => {
            info!("event=cli_command module=cli status=ok command={name}");
            Ok(())
        }
        Err(err) => {
            error!("event=cli_command module=cli status=error command={name} error={err}");
            Err(err)
        }
    }
}

fn execute<S: KvStore, G: IdGenerator>(
    board: &mut BoardService<S, G>,
    command: Command,
) -> Result<()> {
    match command {
        Command::List { query } => {
            if let Some(query) = query {
                board.search_input(query, std::time::Instant::now());
                board.flush_search();
            }
            let topics = board.filtered_topics();
            if topics.is_empty() {
                println!("no topics");
            }
            for topic in topics {
                print_card(topic);
            }
        }
        Command::Show { topic_id } => {
            board.select_topic(&topic_id);
            let Some(topic) = board.active_topic() else {
                bail!("topic not found: {topic_id}");
            };
            print_detail(topic);
        }
        Command::AddTopic => {
            let id = board.add_topic()?;
            println!("{id}");
        }
        Command::EditTopic(args) => edit_topic(board, args)?,
        Command::DeleteTopic { topic_id } => {
            if !board.delete_topic(&topic_id)? {
                bail!("topic not found: {topic_id}");
            }
        }
        Command::AddSubtopic { topic_id } => match board.add_subtopic(&topic_id)? {
            Some(id) => println!("{id}"),
            None => bail!("topic not found: {topic_id}"),
        },
        Command::EditSubtopic(args) => edit_subtopic(board, args)?,
        Command::DeleteSubtopic {
            topic_id,
            subtopic_id,
        } => {
            if !board.delete_subtopic(&topic_id, &subtopic_id)? {
                bail!("subtopic not found: {topic_id}/{subtopic_id}");
            }
        }
        Command::Export { out } => {
            let path = out.join(EXPORT_FILE_NAME);
            let json = board.export_json()?;
            fs::write(&path, json)
                .with_context(|| format!("failed to write `{}`", path.display()))?;
            println!("{}", path.display());
        }
        Command::Import { file } => {
            let count = import_file(board, &file)?;
            println!("imported {count} topics");
        }
        Command::Version => println!("knowboard_core version={}", core_version()),
    }
    Ok(())
}

fn edit_topic<S: KvStore, G: IdGenerator>(
    board: &mut BoardService<S, G>,
    args: EditTopicArgs,
) -> Result<()> {
    if board.topic(&args.topic_id).is_none() {
        bail!("topic not found: {}", args.topic_id);
    }
    let patch = TopicPatch {
        title: args.title,
        icon: args.icon,
        color: args.color,
        summary: args.summary,
        tags: args.tags.as_deref().map(parse_tags),
    };
    if !board.update_topic(&args.topic_id, patch)? {
        println!("nothing changed");
    }
    Ok(())
}

fn edit_subtopic<S: KvStore, G: IdGenerator>(
    board: &mut BoardService<S, G>,
    args: EditSubtopicArgs,
) -> Result<()> {
    let exists = board
        .topic(&args.topic_id)
        .and_then(|topic| topic.subtopic(&args.subtopic_id))
        .is_some();
    if !exists {
        bail!("subtopic not found: {}/{}", args.topic_id, args.subtopic_id);
    }
    let patch = SubtopicPatch {
        title: args.title,
        summary: args.summary,
    };
    if !board.update_subtopic(&args.topic_id, &args.subtopic_id, patch)? {
        println!("nothing changed");
    }
    Ok(())
}

fn import_file<S: KvStore, G: IdGenerator>(
    board: &mut BoardService<S, G>,
    file: &Path,
) -> Result<usize> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read `{}`", file.display()))?;
    let count = board
        .import_json(&text)
        .context("the file is not a valid board export")?;
    Ok(count)
}

fn print_card(topic: &Topic) {
    let icon = match topic.icon_kind() {
        IconKind::Emoji => format!("{} ", topic.icon),
        IconKind::Image | IconKind::None => String::new(),
    };
    println!("{icon}{}  [{}]", topic.title, topic.id);
    if !topic.tags.is_empty() {
        println!("  {}", topic.tags.join(" · "));
    }
    if let Some(excerpt) = topic.card_excerpt() {
        println!("  {excerpt}");
    }
    println!("  {} subtopics", topic.subtopics.len());
}

fn print_detail(topic: &Topic) {
    println!("# {}", topic.title);
    println!("id: {}", topic.id);
    println!("icon: {}", topic.icon);
    println!("color: {}", topic.color);
    println!("tags: {}", topic.tags_input());
    println!();
    println!("{}", topic.summary);
    for sub in &topic.subtopics {
        println!();
        println!("## {}  [{}]", sub.title, sub.id);
        println!("{}", sub.summary);
    }
}
