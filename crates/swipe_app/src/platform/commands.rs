//! Line-oriented input for the headless driver.
//!
//! Each stdin line is one command. Pointer commands carry coordinates in card
//! space; `swipe` expands into a full press, drag and release.

use anyhow::{anyhow, bail, Context, Result};
use swipe_core::{JobId, Msg, Point, User};

pub const HELP: &str = "\
commands:
  down <id> <x> <y> | move <id> <x> <y> | up <id> | leave <id>
  swipe <id> <dx> [dy]       press at origin, drag by (dx, dy), release
  skip <id> | apply <id> | save <id>
  details <id> | close | details-apply | details-save
  scroll <fraction>          report sentinel visibility (0.0..=1.0)
  unmount <id>               tear down a single card
  retry | login <id> <name> <email> | logout
  view | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    View,
    Help,
    Quit,
    Nothing,
}

pub fn parse(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Nothing);
    };
    let args: Vec<&str> = words.collect();

    let msg = match verb {
        "view" => return Ok(Command::View),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "down" => Msg::PointerDown {
            job_id: job_id(&args)?,
            pos: point(&args, 1)?,
        },
        "move" => Msg::PointerMoved {
            job_id: job_id(&args)?,
            pos: point(&args, 1)?,
        },
        "up" => Msg::PointerUp {
            job_id: job_id(&args)?,
        },
        "leave" => Msg::PointerLeft {
            job_id: job_id(&args)?,
        },
        "swipe" => return swipe(&args),
        "skip" => Msg::SkipClicked {
            job_id: job_id(&args)?,
        },
        "apply" => Msg::ApplyClicked {
            job_id: job_id(&args)?,
        },
        "save" => Msg::SaveClicked {
            job_id: job_id(&args)?,
        },
        "details" => Msg::DetailsOpened {
            job_id: job_id(&args)?,
        },
        "close" => Msg::DetailsClosed,
        "details-apply" => Msg::DetailsApplyClicked,
        "details-save" => Msg::DetailsSaveClicked,
        "scroll" => Msg::SentinelVisibility {
            fraction: number(&args, 0, "fraction")?,
        },
        "unmount" => Msg::CardUnmounted {
            job_id: job_id(&args)?,
        },
        "retry" => Msg::RetryClicked,
        "login" => login(&args)?,
        "logout" => Msg::LoggedOut,
        other => bail!("unknown command `{other}` (try `help`)"),
    };
    Ok(Command::Dispatch(vec![msg]))
}

fn swipe(args: &[&str]) -> Result<Command> {
    let job_id = job_id(args)?;
    let dx: f32 = number(args, 1, "dx")?;
    let dy: f32 = match args.get(2) {
        Some(_) => number(args, 2, "dy")?,
        None => 0.0,
    };
    Ok(Command::Dispatch(vec![
        Msg::PointerDown {
            job_id: job_id.clone(),
            pos: Point::ZERO,
        },
        Msg::PointerMoved {
            job_id: job_id.clone(),
            pos: Point::new(dx, dy),
        },
        Msg::PointerUp { job_id },
    ]))
}

fn login(args: &[&str]) -> Result<Msg> {
    let [id, name, email] = args else {
        bail!("usage: login <id> <name> <email>");
    };
    Ok(Msg::LoggedIn(User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        avatar: String::new(),
    }))
}

fn job_id(args: &[&str]) -> Result<JobId> {
    args.first()
        .map(|id| JobId::new(*id))
        .ok_or_else(|| anyhow!("missing job id"))
}

fn point(args: &[&str], at: usize) -> Result<Point> {
    Ok(Point::new(number(args, at, "x")?, number(args, at + 1, "y")?))
}

fn number<T>(args: &[&str], at: usize, name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = args.get(at).ok_or_else(|| anyhow!("missing {name}"))?;
    raw.parse()
        .with_context(|| format!("{name} must be a number, got `{raw}`"))
}
