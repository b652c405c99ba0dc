mod common;
use basic::mach::{Event, Runtime};
use common::*;

#[test]
fn test_print_sum_then_end() {
    assert_eq!(run(&["10 PRINT 1+2", "20 END", "RUN"]), "3\n");
}

#[test]
fn test_for_loop_prints_each_value() {
    assert_eq!(
        run(&["10 FOR I=1 TO 3", "20 PRINT I", "30 NEXT I", "40 END", "RUN"]),
        "1\n2\n3\n"
    );
}

#[test]
fn test_let_string() {
    assert_eq!(run(&["10 LET A$=\"HI\"", "20 PRINT A$", "RUN"]), "HI\n");
}

#[test]
fn test_direct_line_then_ready() {
    let mut r = Runtime::default();
    r.enter("PRINT 2*3");
    assert_eq!(r.execute(5000), Event::Print("6\n".to_string()));
    assert_eq!(r.execute(5000), Event::Print("READY.\n".to_string()));
    assert_eq!(r.execute(5000), Event::Stopped);
}

#[test]
fn test_read_first_data_item() {
    assert_eq!(
        run(&["10 DATA 1,2,3", "20 READ A", "30 PRINT A", "40 END", "RUN"]),
        "1\n"
    );
}

#[test]
fn test_goto_missing_line_keeps_session() {
    let mut r = Runtime::default();
    r.enter("10 GOTO 999");
    r.enter("RUN");
    assert_eq!(exec(&mut r), "?UNDEFINED LINE IN 10\n");
    r.enter("PRINT 1");
    assert_eq!(exec(&mut r), "1\n");
}
