#![no_main]

use libfuzzer_sys::fuzz_target;
use machine_core::{step_one, IoPort, MachineState, PortError};

struct EchoPort(i64);

impl IoPort for EchoPort {
    fn read_input(&mut self) -> Result<i64, PortError> {
        Ok(self.0)
    }

    fn write_output(&mut self, _value: i64) -> Result<(), PortError> {
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut state = MachineState::default();
    let mut port = EchoPort(i64::try_from(data.len()).unwrap_or(0) - 128);

    for line in text.lines() {
        let tokens: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_ascii_whitespace())
            .filter(|token| !token.is_empty())
            .collect();
        if tokens.is_empty() {
            continue;
        }

        let before = state.clone();
        if step_one(&mut state, &tokens, &mut port).is_err() {
            assert_eq!(state, before, "failed instruction mutated state: {line}");
        }
        state.end_cycle();
    }
});
