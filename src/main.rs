use std::io;
use std::path::PathBuf;

use clap::Parser;
use console::{style, Term};

use pangram_squad::{
    CanRepresentLetterBitmask, Roster, RosterError, SearchOutcome, TeamFinder, Verbosity,
};

/// Find fixed-size teams whose member names cover the most alphabet letters.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// File with one candidate name per line (built-in roster when omitted)
    #[clap(short, long, value_parser, value_name = "FILE")]
    roster: Option<PathBuf>,

    /// Number of members per team
    #[clap(short, long, value_parser, default_value_t = 5)]
    team_size: usize,

    /// Search on a single thread instead of the thread pool
    #[clap(long, action)]
    serial: bool,

    /// Turn debugging information on
    #[clap(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn run(args: &Args) -> Result<(), RosterError> {
    let roster = match &args.roster {
        Some(path) => Roster::load(path)?,
        None => Roster::builtin(),
    };

    let term = Term::stdout();
    term.set_title("Pangram Squad");
    term.write_line(&format!(
        "Searching for the best {}-member teams among {} candidates",
        args.team_size,
        roster.len()
    ))?;

    let mut finder = TeamFinder::new(roster, args.team_size);
    finder.set_verbosity(if args.debug != 0 {
        Verbosity::Debug
    } else {
        Verbosity::PrettyPrint
    });

    if args.debug != 0 {
        let head: Vec<&str> = finder.ranked().iter().take(10).map(|c| c.name()).collect();
        term.write_line(&format!("Rarity ranking head: {}", head.join(", ")))?;
    }

    let outcome = if args.serial {
        finder.solve()
    } else {
        finder.solve_parallel()
    };

    render(&term, &outcome)?;

    if args.debug != 0 {
        term.write_line("")?;
        term.write_line(&format!("{}", outcome.stats))?;
    }

    Ok(())
}

fn render(term: &Term, outcome: &SearchOutcome) -> io::Result<()> {
    if outcome.teams.is_empty() {
        term.write_line("No complete team can be formed from this roster.")?;
        return Ok(());
    }

    term.write_line("")?;
    term.write_line(
        style(format!(
            "{} team(s) covering {} letters",
            outcome.teams.len(),
            outcome.best_coverage
        ))
        .bold()
        .to_string()
        .as_str(),
    )?;

    for (idx, team) in outcome.teams.iter().enumerate() {
        term.write_line("")?;
        term.write_line(&format!("Team {}:", idx + 1))?;
        for member in team.members() {
            term.write_line(member.name())?;
        }

        let missing: String = team.missing_letters().iter_letters().collect();
        term.write_line(&format!("missing chars: {} ({})", missing.len(), missing))?;
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
