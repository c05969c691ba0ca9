//! Line-oriented storefront for the terminal. Each input line is parsed into a
//! [`Command`] and run against the views; the reply is plain text.

use chrono::NaiveDate;
use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::checkout::{parse_seat_label, Checkout, CheckoutStage, Product, SeatToggle, Size};
use crate::models::{Movie, Screening};
use crate::views::admin::{self, NewScreening, ScreeningPatch};
use crate::views::{
    login, movies, purchase_history, screenings, sodas, tickets, vote_suggest, ViewError,
};
use crate::{AppState, Route};

pub const HELP: &str = "\
movies | search <title> | movie <id>
screenings | screenings-on <YYYY-MM-DD> | screening <id>
seats | seat <A1> | next | back | add <popcorn|soda> <s|m|l> | remove <popcorn|soda> <s|m|l> | clear-snacks | confirm
sodas
signup <user> <password> | login <user> <password> | logout | delete-account [yes]
history
suggestions | vote <id> | suggest <title>
admin list <movie id> | admin new <movie id> <tickets> <date> <time> | admin edit <screening id>
admin update tickets=<n> date=<YYYY-MM-DD> time=<HH:MM> | admin delete [yes] | admin unsuggest <id>
go <path> | where | help | quit";

const PICK_SCREENING: &str = "Pick a screening with `admin edit <id>` first.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Where,
    Go(Route),
    Movies,
    Search(String),
    SelectMovie(i64),
    Screenings,
    ScreeningsOn(NaiveDate),
    SelectScreening(i64),
    Seats,
    Seat(usize, usize),
    Next,
    Back,
    Add(Product, Size),
    Remove(Product, Size),
    ClearSnacks,
    Confirm,
    Sodas,
    SignUp { username: String, password: String },
    SignIn { username: String, password: String },
    Logout,
    DeleteAccount { confirmed: bool },
    History,
    Suggestions,
    Vote(i64),
    Suggest(String),
    AdminList(i64),
    AdminNew { movie_id: String, tickets: String, date: String, time: String },
    AdminEdit(i64),
    AdminUpdate(ScreeningPatch),
    AdminDelete { confirmed: bool },
    AdminUnsuggest(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, try `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

fn id_arg(arg: Option<&str>, usage: &'static str) -> Result<i64, ParseCommandError> {
    arg.and_then(|s| s.parse().ok()).ok_or(ParseCommandError::Usage(usage))
}

fn snack_args(args: &[&str], usage: &'static str) -> Result<(Product, Size), ParseCommandError> {
    match args {
        [product, size] => Ok((
            product.parse().map_err(|_| ParseCommandError::Usage(usage))?,
            size.parse().map_err(|_| ParseCommandError::Usage(usage))?,
        )),
        _ => Err(ParseCommandError::Usage(usage)),
    }
}

fn parse_admin(args: &[&str]) -> Result<Command, ParseCommandError> {
    match args {
        ["list", movie] => Ok(Command::AdminList(id_arg(Some(*movie), "admin list <movie id>")?)),
        ["new", movie_id, tickets, date, time] => Ok(Command::AdminNew {
            movie_id: movie_id.to_string(),
            tickets: tickets.to_string(),
            date: date.to_string(),
            time: time.to_string(),
        }),
        ["edit", id] => Ok(Command::AdminEdit(id_arg(Some(*id), "admin edit <screening id>")?)),
        ["update", fields @ ..] => {
            let mut patch = ScreeningPatch::default();
            for field in fields {
                match field.split_once('=') {
                    Some(("tickets", v)) => patch.tickets_remaining = Some(v.to_string()),
                    Some(("date", v)) => patch.date = Some(v.to_string()),
                    Some(("time", v)) => patch.time = Some(v.to_string()),
                    _ => {
                        return Err(ParseCommandError::Usage(
                            "admin update tickets=<n> date=<YYYY-MM-DD> time=<HH:MM>",
                        ))
                    }
                }
            }
            Ok(Command::AdminUpdate(patch))
        }
        ["delete"] => Ok(Command::AdminDelete { confirmed: false }),
        ["delete", "yes"] => Ok(Command::AdminDelete { confirmed: true }),
        ["unsuggest", id] => Ok(Command::AdminUnsuggest(id_arg(Some(*id), "admin unsuggest <id>")?)),
        _ => Err(ParseCommandError::Usage("admin list|new|edit|update|delete|unsuggest ...")),
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "" => return Err(ParseCommandError::Empty),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "where" => Command::Where,
            "go" => Command::Go(rest.parse().map_err(|_| ParseCommandError::Usage("go <path>"))?),
            "movies" => Command::Movies,
            "search" => Command::Search(rest.to_string()),
            "movie" => Command::SelectMovie(id_arg(args.first().copied(), "movie <id>")?),
            "screenings" => Command::Screenings,
            "screenings-on" => Command::ScreeningsOn(
                NaiveDate::parse_from_str(rest, "%Y-%m-%d")
                    .map_err(|_| ParseCommandError::Usage("screenings-on <YYYY-MM-DD>"))?,
            ),
            "screening" => Command::SelectScreening(id_arg(args.first().copied(), "screening <id>")?),
            "seats" => Command::Seats,
            "seat" => {
                let (row, column) = parse_seat_label(rest).ok_or(ParseCommandError::Usage("seat <A1>"))?;
                Command::Seat(row, column)
            }
            "next" => Command::Next,
            "back" => Command::Back,
            "add" => {
                let (product, size) = snack_args(&args, "add <popcorn|soda> <s|m|l>")?;
                Command::Add(product, size)
            }
            "remove" => {
                let (product, size) = snack_args(&args, "remove <popcorn|soda> <s|m|l>")?;
                Command::Remove(product, size)
            }
            "clear-snacks" => Command::ClearSnacks,
            "confirm" => Command::Confirm,
            "sodas" => Command::Sodas,
            "signup" | "login" => match args.as_slice() {
                [username, password] => {
                    let (username, password) = (username.to_string(), password.to_string());
                    if verb.eq_ignore_ascii_case("signup") {
                        Command::SignUp { username, password }
                    } else {
                        Command::SignIn { username, password }
                    }
                }
                _ => return Err(ParseCommandError::Usage("signup|login <user> <password>")),
            },
            "logout" => Command::Logout,
            "delete-account" => Command::DeleteAccount { confirmed: rest == "yes" },
            "history" => Command::History,
            "suggestions" => Command::Suggestions,
            "vote" => Command::Vote(id_arg(args.first().copied(), "vote <id>")?),
            "suggest" => Command::Suggest(rest.to_string()),
            "admin" => parse_admin(&args)?,
            other => return Err(ParseCommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Reply::Text(text)
    }
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Reply::Text(text.to_string())
    }
}

/// Page-local state that the browser would keep in its components.
pub struct Shell {
    state: Arc<AppState>,
    checkout: Option<Checkout>,
    editing: Option<Screening>,
}

impl Shell {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state, checkout: None, editing: None }
    }

    pub fn checkout(&self) -> Option<&Checkout> {
        self.checkout.as_ref()
    }

    fn open(&mut self, route: Route) {
        if self.state.navigator.current() != route {
            self.state.navigator.navigate(route);
        }
    }

    /// Runs one command. Failures come back as text for the user.
    pub async fn execute(&mut self, command: Command) -> Reply {
        match self.dispatch(command).await {
            Ok(reply) => reply,
            Err(e) => Reply::Text(e.to_string()),
        }
    }

    async fn dispatch(&mut self, command: Command) -> Result<Reply, ViewError> {
        let state = Arc::clone(&self.state);
        let state = state.as_ref();

        let reply: Reply = match command {
            Command::Help => HELP.into(),
            Command::Quit => Reply::Quit,
            Command::Where => {
                let who = state.session.account.username().unwrap_or_else(|| "guest".to_string());
                format!("{} ({})", state.navigator.current(), who).into()
            }
            Command::Go(route) => {
                self.open(route);
                format!("{}", route).into()
            }

            Command::Movies => {
                self.open(Route::Movies);
                render_movies(&movies::list(state).await?).into()
            }
            Command::Search(title) => {
                self.open(Route::Movies);
                render_movies(&movies::search(state, &title).await?).into()
            }
            Command::SelectMovie(id) => {
                let route = movies::select_by_id(state, id).await?;
                let title = state.session.movie.title().unwrap_or_default();
                if route == Route::Screenings {
                    let listing = screenings::for_selected_movie(state).await?;
                    format!("{}\n{}", title, render_screenings(&listing)).into()
                } else {
                    format!("Selected {}. Sign in to buy tickets.", title).into()
                }
            }

            Command::Screenings => {
                self.open(Route::Screenings);
                render_screenings(&screenings::for_selected_movie(state).await?).into()
            }
            Command::ScreeningsOn(date) => {
                self.open(Route::Screenings);
                render_screenings(&screenings::on_date(state, date).await?).into()
            }
            Command::SelectScreening(id) => {
                screenings::select_by_id(state, id).await?;
                let checkout = tickets::begin(state)?;
                let text = format!("{}{}", checkout.seats(), seat_legend());
                self.checkout = Some(checkout);
                text.into()
            }

            Command::Seats => {
                let checkout = self.checkout.as_ref().ok_or(ViewError::NoScreeningSelected)?;
                format!(
                    "{}{}\n{} ticket(s), {}",
                    checkout.seats(),
                    seat_legend(),
                    checkout.tickets(),
                    checkout.concessions()
                )
                .into()
            }
            Command::Seat(row, column) => {
                let checkout = self.checkout.as_mut().ok_or(ViewError::NoScreeningSelected)?;
                let label = crate::checkout::seat_label(row, column);
                let text = match checkout.toggle_seat(row, column)? {
                    SeatToggle::Selected => format!("{} selected", label),
                    SeatToggle::Released => format!("{} released", label),
                    SeatToggle::Unavailable => format!("{} is already taken", label),
                };
                format!("{} - {} ticket(s)", text, checkout.tickets()).into()
            }
            Command::Next => {
                let checkout = self.checkout.as_mut().ok_or(ViewError::NoScreeningSelected)?;
                let stage = checkout.advance()?;
                describe_stage(checkout, stage).into()
            }
            Command::Back => {
                let checkout = self.checkout.as_mut().ok_or(ViewError::NoScreeningSelected)?;
                let stage = checkout.back();
                describe_stage(checkout, stage).into()
            }
            Command::Add(product, size) => {
                let checkout = self.checkout.as_mut().ok_or(ViewError::NoScreeningSelected)?;
                checkout.concessions_mut().add(product, size);
                checkout.concessions().to_string().into()
            }
            Command::Remove(product, size) => {
                let checkout = self.checkout.as_mut().ok_or(ViewError::NoScreeningSelected)?;
                checkout.concessions_mut().remove(product, size);
                checkout.concessions().to_string().into()
            }
            Command::ClearSnacks => {
                let checkout = self.checkout.as_mut().ok_or(ViewError::NoScreeningSelected)?;
                checkout.concessions_mut().clear();
                checkout.concessions().to_string().into()
            }
            Command::Confirm => {
                let checkout = self.checkout.as_ref().ok_or(ViewError::NoScreeningSelected)?;
                let order = tickets::complete_purchase(state, checkout).await?;
                self.checkout = None;
                format!(
                    "{}\nOrder #{}: {} ticket(s) {}",
                    tickets::thanks_message(state),
                    order.id,
                    order.tickets,
                    order.seats.join(" ")
                )
                .into()
            }

            Command::Sodas => {
                self.open(Route::Sodas);
                let mut out = String::new();
                for soda in sodas::list(state).await? {
                    let _ = writeln!(out, "{:>4}  {}", soda.id, soda.name);
                }
                out.into()
            }

            Command::SignUp { username, password } => {
                self.open(Route::Login);
                let outcome = login::sign_up(state, &login::Credentials::new(username, password)).await?;
                outcome.to_string().into()
            }
            Command::SignIn { username, password } => {
                self.open(Route::Login);
                let outcome = login::sign_in(state, &login::Credentials::new(username, password)).await?;
                outcome.to_string().into()
            }
            Command::Logout => {
                login::logout(state);
                self.checkout = None;
                self.editing = None;
                "Logged out".into()
            }
            Command::DeleteAccount { confirmed: false } => {
                "This deletes your account. Run `delete-account yes` to go ahead.".into()
            }
            Command::DeleteAccount { confirmed: true } => {
                login::delete_account(state).await?;
                self.checkout = None;
                "Account deleted".into()
            }

            Command::History => {
                self.open(Route::PurchaseHistory);
                let history = purchase_history::load(state).await?;
                let mut out = history.to_string();
                for entry in &history.entries {
                    let when = entry
                        .screening
                        .as_ref()
                        .map(|s| format!("{} {}", s.date, s.time.format("%H:%M")))
                        .unwrap_or_else(|| "screening removed".to_string());
                    let _ = write!(
                        out,
                        "\n#{:<4} {}  {} ticket(s)",
                        entry.order.id, when, entry.order.tickets
                    );
                    if entry.order.has_popcorn() {
                        out.push_str("  +popcorn");
                    }
                    if entry.order.has_soda() {
                        out.push_str("  +soda");
                    }
                }
                out.into()
            }

            Command::Suggestions => {
                self.open(Route::VoteSuggest);
                let mut out = String::new();
                for s in vote_suggest::list(state).await? {
                    let _ = writeln!(out, "{:>4}  {}  ({} votes)", s.id, s.movie_title, s.votes);
                }
                out.into()
            }
            Command::Vote(id) => {
                vote_suggest::vote(state, id).await?;
                vote_suggest::VOTE_THANKS.into()
            }
            Command::Suggest(title) => vote_suggest::suggest(state, &title).await?.to_string().into(),

            Command::AdminList(movie_id) => {
                self.open(Route::Admin);
                render_screenings(&admin::screenings_for_movie(state, movie_id).await?).into()
            }
            Command::AdminNew { movie_id, tickets, date, time } => {
                self.open(Route::Admin);
                match NewScreening::parse(&movie_id, &tickets, &date, &time) {
                    Ok(form) => match admin::create_screening(state, &form).await {
                        Ok(created) => format!("Screening {} created", created.id).into(),
                        Err(e) => e.to_string().into(),
                    },
                    Err(e) => e.to_string().into(),
                }
            }
            Command::AdminEdit(id) => {
                self.open(Route::Admin);
                let selected = admin::select_screening(state, id).await?;
                let text = format!(
                    "Editing screening {} of {}: {} {} ({} left)",
                    selected.screening.id,
                    selected.movie.title,
                    selected.screening.date,
                    selected.screening.time.format("%H:%M"),
                    selected.screening.tickets_remaining
                );
                self.editing = Some(selected.screening);
                text.into()
            }
            Command::AdminUpdate(patch) => {
                let Some(current) = self.editing.clone() else {
                    return Ok(PICK_SCREENING.into());
                };
                match admin::update_screening(state, &current, &patch).await {
                    Ok((saved, listing)) => {
                        self.editing = Some(saved);
                        render_screenings(&listing).into()
                    }
                    Err(e) => e.to_string().into(),
                }
            }
            Command::AdminDelete { confirmed } => {
                let Some(current) = self.editing.clone() else {
                    return Ok(PICK_SCREENING.into());
                };
                if !confirmed {
                    return Ok(format!(
                        "Delete screening {}? Run `admin delete yes` to go ahead.",
                        current.id
                    )
                    .into());
                }
                let listing = admin::delete_screening(state, &current).await?;
                self.editing = None;
                render_screenings(&listing).into()
            }
            Command::AdminUnsuggest(id) => {
                let remaining = admin::delete_suggestion(state, id).await?;
                format!("{} suggestion(s) left", remaining.len()).into()
            }
        };
        Ok(reply)
    }
}

fn render_movies(movies: &[Movie]) -> String {
    if movies.is_empty() {
        return "No movies found".to_string();
    }
    let mut out = String::new();
    for m in movies {
        let _ = writeln!(
            out,
            "{:>4}  {} ({}, {}, {} min)",
            m.id, m.title, m.year, m.rating, m.runtime
        );
    }
    out
}

fn render_screenings(screenings: &[Screening]) -> String {
    if screenings.is_empty() {
        return "No screenings found".to_string();
    }
    let mut out = String::new();
    for s in screenings {
        let _ = writeln!(
            out,
            "{:>4}  {} {}  {} left",
            s.id,
            s.date,
            s.time.format("%H:%M"),
            s.tickets_remaining
        );
    }
    out
}

fn seat_legend() -> &'static str {
    "    . free  x taken  o yours"
}

fn describe_stage(checkout: &Checkout, stage: CheckoutStage) -> String {
    match stage {
        CheckoutStage::SeatSelection => format!("Pick your seats ({} selected)", checkout.tickets()),
        CheckoutStage::Concessions => format!("Snacks? {}", checkout.concessions()),
        CheckoutStage::Confirm => format!(
            "{} ticket(s) {}, {}. Type `confirm` to buy.",
            checkout.tickets(),
            checkout.seats().selected_labels().join(" "),
            checkout.concessions()
        ),
    }
}

/// Reads commands from stdin until EOF or `quit`.
pub async fn run(state: Arc<AppState>) -> anyhow::Result<()> {
    let mut shell = Shell::new(state);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout.write_all(b"Movie screenings e-store. Type `help` for commands.\n> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let text = match line.parse::<Command>() {
            Ok(command) => match shell.execute(command).await {
                Reply::Quit => break,
                Reply::Text(text) => text,
            },
            Err(ParseCommandError::Empty) => String::new(),
            Err(e) => e.to_string(),
        };
        let text = text.trim_end();
        if !text.is_empty() {
            stdout.write_all(text.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }
    Ok(())
}
