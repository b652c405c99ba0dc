use basic::mach::{Event, Runtime};

pub fn exec(runtime: &mut Runtime) -> String {
    exec_n(runtime, 5000)
}

/// Collect everything the runtime emits until it stops or asks for input.
pub fn exec_n(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles);
        match &event {
            Event::Stopped | Event::Bye => {
                break;
            }
            Event::Errors(errors) => {
                for error in errors.iter() {
                    s.push_str(&format!("?{}\n", error));
                }
            }
            Event::Running => {
                if prev_running {
                    s.push_str(&format!("\n{} Execution cycles exceeded.\n", cycles));
                    break;
                }
            }
            Event::Print(ps) => {
                s.push_str(ps);
            }
            Event::Input(ps) => {
                s.push_str(ps);
                break;
            }
            Event::List(ls) => {
                s.push_str(&format!("{}\n", ls));
            }
            Event::Load(name) => {
                s.push_str(&format!("<LOAD {}>\n", name));
            }
            Event::Save(name) => {
                s.push_str(&format!("<SAVE {}>\n", name));
            }
            Event::Cls => {
                s.push_str("<CLS>\n");
            }
        }
        prev_running = matches!(event, Event::Running);
    }
    s.trim_end_matches("READY.\n").to_string()
}

/// Enter every line then run the last one.
pub fn run(lines: &[&str]) -> String {
    let mut r = Runtime::default();
    for line in lines {
        r.enter(line);
    }
    exec(&mut r)
}
