mod common;
use common::*;

#[test]
fn test_numeric_functions() {
    assert_eq!(run(&["PRINT ABS(-3)"]), "3\n");
    assert_eq!(run(&["PRINT INT(-3.7);INT(3.7)"]), "-33\n");
    assert_eq!(run(&["PRINT SGN(-2);SGN(0);SGN(9)"]), "-101\n");
    assert_eq!(run(&["PRINT SQR(16)"]), "4\n");
    assert_eq!(run(&["PRINT CLOG(1000)"]), "3\n");
    assert_eq!(run(&["PRINT LOG(1)"]), "0\n");
    assert_eq!(run(&["PRINT EXP(0);COS(0);SIN(0);ATN(0)"]), "1100\n");
}

#[test]
fn test_string_functions() {
    assert_eq!(run(&["PRINT LEN(\"HELLO\")"]), "5\n");
    assert_eq!(run(&["PRINT CHR$(65)"]), "A\n");
    assert_eq!(run(&["PRINT ASC(\"A\")"]), "65\n");
    assert_eq!(run(&["PRINT STR$(3)"]), "3\n");
    assert_eq!(run(&["PRINT VAL(\"12\")+1"]), "13\n");
    assert_eq!(run(&["A$=STR$(42):PRINT LEN(A$)"]), "2\n");
    assert_eq!(run(&["A$=CHR$(66):PRINT ASC(A$)"]), "66\n");
}

#[test]
fn test_rnd_is_a_fraction() {
    assert_eq!(run(&["X=RND(1):PRINT X>=0 AND X<1"]), "1\n");
}

#[test]
fn test_illegal_arguments() {
    assert_eq!(run(&["PRINT SQR(-1)"]), "?ILLEGAL FUNCTION CALL\n");
    assert_eq!(run(&["PRINT LOG(0)"]), "?ILLEGAL FUNCTION CALL\n");
    assert_eq!(run(&["PRINT CHR$(256)"]), "?ILLEGAL FUNCTION CALL\n");
    assert_eq!(
        run(&["10 PRINT ASC(\"\")", "RUN"]),
        "?ILLEGAL FUNCTION CALL IN 10; EMPTY STRING\n"
    );
}
