//! Interactive six-option menu over the student service.
//!
//! # Responsibility
//! - Collect raw field input with re-prompting on invalid values.
//! - Dispatch menu choices to service calls and print their outcome.
//!
//! # Invariants
//! - Recoverable store errors are reported and the loop continues.
//! - End of input ends the session cleanly.

use crate::table;
use log::error;
use std::io::{self, BufRead, Write};
use student_records_core::{
    Field, RepoError, Student, StudentPatch, StudentRepository, StudentService,
};

const BANNER_RULE: &str = "==============================";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Register,
    DisplayAll,
    Find,
    Modify,
    Remove,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(Self::Register),
            "2" => Some(Self::DisplayAll),
            "3" => Some(Self::Find),
            "4" => Some(Self::Modify),
            "5" => Some(Self::Remove),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Menu session reading from `input` and writing to `output`.
pub struct Menu<'a, Repo: StudentRepository, R: BufRead, W: Write> {
    service: &'a StudentService<Repo>,
    input: R,
    output: W,
}

impl<'a, Repo: StudentRepository, R: BufRead, W: Write> Menu<'a, Repo, R, W> {
    pub fn new(service: &'a StudentService<Repo>, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Runs until the user picks Exit or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let Some(choice) = self.prompt("Enter your choice (1-6): ")? else {
                return Ok(());
            };

            let flow = match Choice::parse(&choice) {
                Some(Choice::Register) => self.register()?,
                Some(Choice::DisplayAll) => self.display_all()?,
                Some(Choice::Find) => self.find()?,
                Some(Choice::Modify) => self.modify()?,
                Some(Choice::Remove) => self.remove()?,
                Some(Choice::Exit) => {
                    writeln!(
                        self.output,
                        "\nThank you for using the Student Management Portal. Goodbye!"
                    )?;
                    Flow::Quit
                }
                None => {
                    writeln!(self.output, "Invalid choice, please try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Quit = flow {
                return Ok(());
            }
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{BANNER_RULE}")?;
        writeln!(self.output, "   Student Management Portal   ")?;
        writeln!(self.output, "{BANNER_RULE}")?;
        writeln!(self.output, "1. Register New Student")?;
        writeln!(self.output, "2. Display All Students")?;
        writeln!(self.output, "3. Find Student")?;
        writeln!(self.output, "4. Modify Student")?;
        writeln!(self.output, "5. Remove Student")?;
        writeln!(self.output, "6. Exit")?;
        writeln!(self.output, "{BANNER_RULE}\n")
    }

    /// Prints `label` and reads one trimmed line. `None` means end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report_error(&mut self, err: &RepoError) -> io::Result<Flow> {
        error!("event=menu_action module=cli status=error error={err}");
        writeln!(self.output, "Error: {err}")?;
        Ok(Flow::Continue)
    }

    fn register(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n--- Register New Student ---")?;
        let mut student = Student::new("", "", "", "", "");

        for field in Field::ALL {
            loop {
                let Some(value) = self.prompt(&format!("Enter {field}: "))? else {
                    return Ok(Flow::Quit);
                };
                match self.service.check_field_input(field, &value) {
                    Ok(()) => {
                        student.set(field, value);
                        break;
                    }
                    Err(RepoError::Validation(_)) => {
                        writeln!(self.output, "Invalid {field}, please try again.")?;
                    }
                    Err(RepoError::DuplicateRollNo(_)) => {
                        writeln!(
                            self.output,
                            "Roll Number already exists! Enter a unique RollNo."
                        )?;
                    }
                    Err(err) => return self.report_error(&err),
                }
            }
        }

        match self.service.register(&student) {
            Ok(()) => {
                writeln!(self.output, "Student registered successfully!")?;
                Ok(Flow::Continue)
            }
            Err(err) => self.report_error(&err),
        }
    }

    fn display_all(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n--- Student Records ---")?;
        match self.service.list_all() {
            Ok(students) if students.is_empty() => {
                writeln!(self.output, "No student data found.")?;
                Ok(Flow::Continue)
            }
            Ok(students) => {
                write!(self.output, "{}", table::render(&students))?;
                Ok(Flow::Continue)
            }
            Err(err) => self.report_error(&err),
        }
    }

    fn find(&mut self) -> io::Result<Flow> {
        let Some(roll) = self.prompt("Enter Roll Number to search: ")? else {
            return Ok(Flow::Quit);
        };

        match self.service.find_by_roll(&roll) {
            Ok(Some(student)) => {
                writeln!(self.output, "\nStudent Found:")?;
                write!(self.output, "{}", table::render(std::slice::from_ref(&student)))?;
                Ok(Flow::Continue)
            }
            Ok(None) => {
                writeln!(self.output, "Student not found.")?;
                Ok(Flow::Continue)
            }
            Err(err) => self.report_error(&err),
        }
    }

    fn modify(&mut self) -> io::Result<Flow> {
        let Some(roll) = self.prompt("Enter Roll Number to update: ")? else {
            return Ok(Flow::Quit);
        };

        let current = match self.service.find_by_roll(&roll) {
            Ok(Some(student)) => student,
            Ok(None) => {
                writeln!(self.output, "Student not found.")?;
                return Ok(Flow::Continue);
            }
            Err(err) => return self.report_error(&err),
        };

        writeln!(self.output, "Enter new details (leave blank to keep existing):")?;
        let mut patch = StudentPatch::default();
        for field in Field::ALL {
            let label = format!("{field} ({}): ", current.get(field));
            let Some(value) = self.prompt(&label)? else {
                return Ok(Flow::Quit);
            };
            if !value.is_empty() {
                patch = patch.with(field, value);
            }
        }

        match self.service.update_by_roll(&roll, &patch) {
            Ok(report) => {
                for field in report.rejected {
                    writeln!(self.output, "Invalid {field}, keeping existing value.")?;
                }
                writeln!(self.output, "Student details updated successfully!")?;
                Ok(Flow::Continue)
            }
            Err(RepoError::NotFound(_)) => {
                writeln!(self.output, "Student not found.")?;
                Ok(Flow::Continue)
            }
            Err(err) => self.report_error(&err),
        }
    }

    fn remove(&mut self) -> io::Result<Flow> {
        let Some(roll) = self.prompt("Enter Roll Number to delete: ")? else {
            return Ok(Flow::Quit);
        };

        match self.service.delete_by_roll(&roll) {
            Ok(()) => {
                writeln!(
                    self.output,
                    "Student with Roll No. {roll} deleted successfully."
                )?;
                Ok(Flow::Continue)
            }
            Err(RepoError::NotFound(_)) => {
                writeln!(self.output, "Student not found.")?;
                Ok(Flow::Continue)
            }
            Err(err) => self.report_error(&err),
        }
    }
}
