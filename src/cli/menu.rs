//! The interactive numbered menu around two [`HistoricalTemps`] datasets.

use bon::Builder;
use chrono::NaiveDate;
use historical_temps::{
    ArchiveSource, Geocoder, HistoricalTemps, TempsError, DEFAULT_TOP_DAYS,
};
use log::debug;
use std::error::Error;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    One,
    Two,
}

impl Slot {
    fn index(self) -> usize {
        match self {
            Slot::One => 0,
            Slot::Two => 1,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Slot::One => "one",
            Slot::Two => "two",
        }
    }
}

#[derive(Builder)]
pub struct Menu<'a, A, R, W> {
    geocoder: &'a dyn Geocoder,
    archive: A,
    /// Window requested for newly loaded datasets.
    start: NaiveDate,
    end: NaiveDate,
    input: R,
    output: W,
    #[builder(skip)]
    datasets: [Option<HistoricalTemps<A>>; 2],
}

impl<A, R, W> Menu<'_, A, R, W>
where
    A: ArchiveSource + Clone,
    R: BufRead,
    W: Write,
{
    /// Greets the user and serves menu choices until `9` or end of input.
    pub fn run(mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Please enter your name: ")? else {
            return Ok(());
        };
        writeln!(self.output, "Hi {}, let's explore some historical temperatures.", name)?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Please enter your choice: ")? else {
                return Ok(());
            };
            let option = match choice.parse::<u32>() {
                Ok(option) => option,
                Err(_) => {
                    writeln!(self.output, "Invalid input, please enter a number.")?;
                    continue;
                }
            };

            match option {
                1 => {
                    writeln!(self.output, "Option 1 is selected, dataset one loading...")?;
                    self.load_dataset(Slot::One)?;
                }
                2 => {
                    writeln!(self.output, "Option 2 is selected, dataset two loading...")?;
                    self.load_dataset(Slot::Two)?;
                }
                3 => {
                    writeln!(
                        self.output,
                        "Option 3 is selected, displaying average temperatures."
                    )?;
                    self.compare_average_temps()?;
                }
                4 => {
                    writeln!(self.output, "Option 4 is selected... threshold temperature.")?;
                    self.print_extreme_days()?;
                }
                5 => {
                    writeln!(
                        self.output,
                        "Option 5 is selected... displaying highest historical dates."
                    )?;
                    self.print_top_days()?;
                }
                6 => {
                    writeln!(
                        self.output,
                        "Option 6 is selected... changing start date and end date for dataset one."
                    )?;
                    self.change_dates(Slot::One)?;
                }
                7 => {
                    writeln!(
                        self.output,
                        "Option 7 is selected... changing start date and end date for dataset two."
                    )?;
                    self.change_dates(Slot::Two)?;
                }
                9 => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid option, please enter a number 1-7 or 9.")?,
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "Main Menu")?;
        for slot in [Slot::One, Slot::Two] {
            match &self.datasets[slot.index()] {
                Some(dataset) => writeln!(
                    self.output,
                    "{} - Replace {}",
                    slot.index() + 1,
                    dataset.location_name()
                )?,
                None => writeln!(
                    self.output,
                    "{} - Load dataset {}",
                    slot.index() + 1,
                    slot.name()
                )?,
            }
        }
        writeln!(self.output, "3 - Compare average temperatures")?;
        writeln!(self.output, "4 - Dates above threshold temperature")?;
        writeln!(self.output, "5 - Highest historical dates")?;
        writeln!(self.output, "6 - Change start and end dates for dataset one")?;
        writeln!(self.output, "7 - Change start and end dates for dataset two")?;
        writeln!(self.output, "9 - Quit")
    }

    /// Replaces the slot only when the new dataset loads.
    fn load_dataset(&mut self, slot: Slot) -> io::Result<()> {
        let Some(postal_code) = self.prompt("Please enter a zip code: ")? else {
            return Ok(());
        };
        let result = HistoricalTemps::builder(&postal_code)
            .geocoder(self.geocoder)
            .archive(self.archive.clone())
            .start(self.start)
            .end(self.end)
            .build();

        match result {
            Ok(dataset) => {
                debug!("Dataset {} now holds {}", slot.name(), dataset.location_name());
                self.datasets[slot.index()] = Some(dataset);
                Ok(())
            }
            Err(TempsError::InvalidLocation(_)) => writeln!(
                self.output,
                "Invalid zipcode, please check validation and try again."
            ),
            Err(e) => self.report(&e),
        }
    }

    fn compare_average_temps(&mut self) -> io::Result<()> {
        let (Some(one), Some(two)) = (&self.datasets[0], &self.datasets[1]) else {
            return writeln!(
                self.output,
                "Error: Both datasets cannot be None, please try again."
            );
        };
        let averages = [one, two]
            .map(|dataset| (dataset.location_name().to_string(), dataset.average_temp()));

        for (name, average) in averages {
            match average {
                Ok(average) => writeln!(
                    self.output,
                    "{}: Average Temperature = {:.2}",
                    name, average
                )?,
                Err(e) => self.report(&e)?,
            }
        }
        Ok(())
    }

    fn print_extreme_days(&mut self) -> io::Result<()> {
        if self.datasets[0].is_none() {
            return writeln!(self.output, "Dataset is empty, please load a dataset.");
        }
        let Some(raw) = self.prompt("Please enter a threshold temperature: ")? else {
            return Ok(());
        };
        let Ok(threshold) = raw.parse::<f64>() else {
            return writeln!(
                self.output,
                "Invalid input. Please enter a numeric number for temperature."
            );
        };

        let Some(dataset) = &self.datasets[0] else {
            return Ok(());
        };
        let days = dataset.extreme_days(threshold);
        writeln!(
            self.output,
            "Total number of days that exceeded threshold temperature: {}",
            days.len()
        )?;
        for day in days {
            writeln!(self.output, "{}", day)?;
        }
        Ok(())
    }

    fn print_top_days(&mut self) -> io::Result<()> {
        let Some(dataset) = &self.datasets[0] else {
            return writeln!(self.output, "Dataset is empty, please load a dataset.");
        };
        let days = dataset.top_x_days(DEFAULT_TOP_DAYS);
        writeln!(
            self.output,
            "Top five days with the highest temperatures at {}:",
            dataset.location_name()
        )?;
        for day in days {
            writeln!(self.output, "{}", day)?;
        }
        Ok(())
    }

    /// Start then end, each reloading the dataset; stops at the first failure.
    fn change_dates(&mut self, slot: Slot) -> io::Result<()> {
        if self.datasets[slot.index()].is_none() {
            return writeln!(self.output, "Dataset is empty, please load dataset.");
        }
        let Some(new_start) = self.prompt("Enter new start date (YYYY-MM-DD): ")? else {
            return Ok(());
        };
        let Some(new_end) = self.prompt("Enter new end date (YYYY-MM-DD): ")? else {
            return Ok(());
        };

        let Some(dataset) = self.datasets[slot.index()].as_mut() else {
            return Ok(());
        };
        let result = dataset
            .set_start(&new_start)
            .and_then(|()| dataset.set_end(&new_end));

        match result {
            Ok(()) => Ok(()),
            Err(TempsError::InvalidDate { .. }) => {
                writeln!(self.output, "Invalid date, please try again.")
            }
            Err(e) => self.report(&e),
        }
    }

    /// Writes `message`, then reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, err: &TempsError) -> io::Result<()> {
        writeln!(self.output, "Error: {}", error_chain(err))
    }
}

fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
