// src/ui/device.rs
use std::io::{self, BufRead, Write};

use crate::capture::Device;
use crate::error::{Error, Result};

const RULE: &str = "-------------------------------------------------";

pub fn print_device_list<W: Write>(devices: &[Device], out: &mut W) -> io::Result<()> {
    writeln!(out, "\n[Aperture] Found {} network devices:", devices.len())?;
    writeln!(out, "{}", RULE)?;
    for (i, dev) in devices.iter().enumerate() {
        writeln!(out, "  {}: {}", i + 1, dev.name)?;
        if !dev.description.is_empty() {
            writeln!(out, "     {}", dev.description)?;
        }
    }
    writeln!(out, "{}", RULE)
}

/// Writes the device list as a JSON array of `{name, description}` objects.
pub fn write_device_json<W: Write>(devices: &[Device], out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, devices)?;
    writeln!(out)
}

/// Looks up a device by exact name.
pub fn find_device(devices: &[Device], name: &str) -> Result<Device> {
    devices
        .iter()
        .find(|d| d.name == name)
        .cloned()
        .ok_or_else(|| Error::DeviceNotFound(name.to_string()))
}

/// Lists `devices` and asks for a 1-based choice until a valid one is entered.
///
/// Invalid input re-prompts. Returns [`Error::InputClosed`] when `input` hits
/// end of stream and [`Error::SelectionCancelled`] on `q`.
pub fn prompt_device_selection<R: BufRead, W: Write>(
    devices: &[Device],
    input: &mut R,
    out: &mut W,
) -> Result<Device> {
    print_device_list(devices, out)?;

    loop {
        write!(
            out,
            "\nEnter the number of the device to start analysis (1-{}, or 'q' to quit): ",
            devices.len()
        )?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed);
        }

        let choice = line.trim();

        if choice.eq_ignore_ascii_case("q") {
            return Err(Error::SelectionCancelled);
        }

        match choice.parse::<usize>() {
            Ok(n) if (1..=devices.len()).contains(&n) => {
                let device = devices[n - 1].clone();
                writeln!(out, "\n[Aperture] You selected: {}", device.name)?;
                return Ok(device);
            }
            _ => writeln!(
                out,
                "Invalid input. Please enter a number between 1 and {}.",
                devices.len()
            )?,
        }
    }
} // prompt_device_selection

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::mock::device;
    use std::io::Cursor;

    fn devices() -> Vec<Device> {
        vec![device("A", "desc A"), device("B", "desc B")]
    }

    fn select(input: &str) -> (Result<Device>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = prompt_device_selection(&devices(), &mut reader, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_selects_second_device() {
        let (result, out) = select("2\n");
        assert_eq!(result.unwrap(), device("B", "desc B"));
        assert!(out.contains("  1: A"));
        assert!(out.contains("     desc B"));
        assert!(out.contains("You selected: B"));
    }

    #[test]
    fn test_reprompts_on_invalid_input() {
        let (result, out) = select("abc\n0\n3\n-1\n\n1\n");
        assert_eq!(result.unwrap().name, "A");
        assert_eq!(out.matches("Invalid input").count(), 5);
        assert_eq!(out.matches("Enter the number").count(), 6);
    }

    #[test]
    fn test_input_with_whitespace() {
        let (result, _) = select("  2  \r\n");
        assert_eq!(result.unwrap().name, "B");
    }

    #[test]
    fn test_closed_input_is_fatal() {
        let (result, _) = select("9\n");
        assert!(matches!(result, Err(Error::InputClosed)));
    }

    #[test]
    fn test_quit() {
        let (result, _) = select("Q\n");
        assert!(matches!(result, Err(Error::SelectionCancelled)));
    }

    #[test]
    fn test_find_device() {
        assert_eq!(find_device(&devices(), "B").unwrap().description, "desc B");
        assert!(matches!(
            find_device(&devices(), "eth9"),
            Err(Error::DeviceNotFound(name)) if name == "eth9"
        ));
    }

    #[test]
    fn test_device_json() {
        let mut out = Vec::new();
        write_device_json(&devices(), &mut out).unwrap();
        let parsed: Vec<Device> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, devices());
    }
}
