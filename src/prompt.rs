//! Interactive front end: asks for filters, re-prompts on invalid input,
//! shows each statistic family and offers a restart.
//!
//! Generic over the input and output streams so it can be driven from tests.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::filter::{FilterSpec, build_months, build_sources, build_weekdays, parse_tokens};
use crate::output::render_family;
use crate::reader::SourceReader;
use crate::session::Session;
use crate::stats::{BandMode, Family};

const BANNER_RULE: &str = "------------------------------------------------";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").map_err(|e| Error::io("cannot write prompt", e))
    }

    fn read_line(&mut self) -> Result<String> {
        self.output
            .flush()
            .map_err(|e| Error::io("cannot flush prompt", e))?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| Error::io("cannot read input", e))?;
        if read == 0 {
            return Err(Error::io(
                "input closed",
                io::Error::new(io::ErrorKind::UnexpectedEof, "no more input"),
            ));
        }
        Ok(line.trim().to_string())
    }

    /// Asks until the answer is one of `y`, `yes`, `n`, `no` (any case).
    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        loop {
            self.say(&format!("\n{question} Enter (y)yes or (n)no."))?;
            match self.read_line()?.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                other => {
                    debug!(answer = other, "Rejected yes/no answer");
                    self.say("\n  !! Type valid input please !! (eg.: 'y' | 'yes' | 'n' | 'no')\n")?;
                }
            }
        }
    }

    /// Asks for a whitespace separated token list until `build` accepts it.
    pub fn ask_tokens<T>(
        &mut self,
        question: &str,
        example: &str,
        build: impl Fn(&[String]) -> Result<T>,
    ) -> Result<T> {
        loop {
            self.say(question)?;
            self.say("Type here (separated by space): ")?;
            let tokens: Vec<String> = parse_tokens(&self.read_line()?).into_iter().collect();
            match build(&tokens) {
                Ok(value) => {
                    self.say(BANNER_RULE)?;
                    return Ok(value);
                }
                Err(e) if e.is_invalid_token() => {
                    warn!(error = %e, "Invalid filter input");
                    self.say(&format!("\n  !! Type valid input please !! (eg.: '{example}')\n"))?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Asks for sources, months and weekdays in turn.
    pub fn ask_filters(&mut self) -> Result<FilterSpec> {
        let sources = self.ask_tokens(
            "Which cities' data are you interested in?\n  - (c)Chicago,\n  - (n)New York City,\n  - (w)Washington\n  - (a)All\n",
            "c n w",
            build_sources,
        )?;
        let months = self.ask_tokens(
            "Which months' data are you interested in?\n  - (a)All  (1)Jan  (2)Feb  (3)March  (4)Apr  (5)May  (6)June\n",
            "1 2 3 4 5 6",
            build_months,
        )?;
        let weekdays = self.ask_tokens(
            "Which days' data are you interested in?\nOptions:\n  - (m)Monday  (t)Tuesday  (w)Wednesday  (th)Thursday  (f)Friday  (s)Saturday  (su)Sunday\n    (wdays)Weekdays  (wends)Weekends  (a)all\n",
            "m t w th f s su",
            build_weekdays,
        )?;
        Ok(FilterSpec {
            sources,
            months,
            weekdays,
        })
    }

    /// Asks whether to filter at all; declining yields the default spec.
    pub fn ask_spec(&mut self) -> Result<FilterSpec> {
        if self.ask_yes_no("Do you want to filter data?")? {
            self.say("Let's filter data!")?;
            self.say(BANNER_RULE)?;
            self.ask_filters()
        } else {
            self.say("Using default filters (each city, months and days)!")?;
            self.say(BANNER_RULE)?;
            Ok(FilterSpec::default())
        }
    }

    pub fn pause(&mut self) -> Result<()> {
        self.say("Press Enter to continue...")?;
        self.read_line().map(|_| ())
    }

    /// Runs sessions until the user declines a restart. Returns the number of sessions run.
    pub fn run<S: SourceReader + ?Sized>(&mut self, reader: &S, bands: BandMode) -> Result<usize> {
        self.say(BANNER_RULE)?;
        self.say("| Hello! Let's explore some US bikeshare data! |")?;
        self.say(BANNER_RULE)?;

        let mut sessions = 0;
        loop {
            let bulk = self.ask_yes_no("Do you want for statistics in bulk?")?;
            let spec = self.ask_spec()?;
            self.say(&spec.to_string())?;
            if !bulk {
                self.pause()?;
            }

            let session = Session::start(spec, reader)?.with_band_mode(bands);
            sessions += 1;

            for family in Family::ALL {
                self.say(&render_family(&session.compute(family)))?;
                if !bulk {
                    self.pause()?;
                }
            }

            if !self.ask_yes_no("Would you like to restart?")? {
                self.say("\nExit.")?;
                return Ok(sessions);
            }
            self.say("\nRestart.")?;
        }
    }
}
