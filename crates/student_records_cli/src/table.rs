//! Grid rendering for student records.

use student_records_core::{Field, Student};

/// Renders records as a bordered text grid with a header row.
///
/// ```text
/// +--------+----------+
/// | RollNo | FullName |
/// +========+==========+
/// | 1      | Ann Lee  |
/// +--------+----------+
/// ```
pub fn render(students: &[Student]) -> String {
    let header: Vec<&str> = Field::ALL.iter().map(|field| field.as_str()).collect();
    let rows: Vec<Vec<&str>> = students
        .iter()
        .map(|student| Field::ALL.iter().map(|&field| student.get(field)).collect())
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_rule(&mut out, &widths, '-');
    push_row(&mut out, &widths, &header);
    push_rule(&mut out, &widths, '=');
    for row in &rows {
        push_row(&mut out, &widths, row);
        push_rule(&mut out, &widths, '-');
    }
    out
}

fn push_rule(out: &mut String, widths: &[usize], fill: char) {
    out.push('+');
    for width in widths {
        out.extend(std::iter::repeat(fill).take(width + 2));
        out.push('+');
    }
    out.push('\n');
}

fn push_row(out: &mut String, widths: &[usize], cells: &[&str]) {
    out.push('|');
    for (cell, width) in cells.iter().zip(widths) {
        out.push_str(&format!(" {cell:<width$} |"));
    }
    out.push('\n');
}
