mod common;
use common::*;

#[test]
fn test_arithmetic() {
    assert_eq!(run(&["PRINT 2+3*4"]), "14\n");
    assert_eq!(run(&["PRINT (2+3)*4"]), "20\n");
    assert_eq!(run(&["PRINT 2^3"]), "8\n");
    assert_eq!(run(&["PRINT 1/4"]), "0.25\n");
    assert_eq!(run(&["PRINT -(2+3)"]), "-5\n");
    assert_eq!(run(&["PRINT +7"]), "7\n");
}

#[test]
fn test_operators_associate_to_the_right() {
    assert_eq!(run(&["PRINT 10-2-3"]), "11\n");
    assert_eq!(run(&["PRINT 8/4/2"]), "4\n");
}

#[test]
fn test_literals_are_normalized() {
    assert_eq!(run(&["PRINT 007"]), "7\n");
    assert_eq!(run(&["PRINT 1.50"]), "1.5\n");
    assert_eq!(run(&["A=010:PRINT A"]), "10\n");
}

#[test]
fn test_relational() {
    assert_eq!(run(&["PRINT 1=1"]), "1\n");
    assert_eq!(run(&["PRINT 2<1"]), "0\n");
    assert_eq!(run(&["PRINT 2>=2;1<>1;1<=0"]), "100\n");
    assert_eq!(run(&["PRINT \"A\"=\"A\""]), "1\n");
    assert_eq!(run(&["PRINT \"A\"<\"B\""]), "1\n");
    assert_eq!(run(&["A$=\"ABC\":PRINT A$>\"ABD\""]), "0\n");
}

#[test]
fn test_logical() {
    assert_eq!(run(&["PRINT NOT 0"]), "1\n");
    assert_eq!(run(&["PRINT NOT 5"]), "0\n");
    assert_eq!(run(&["PRINT 1 AND 0"]), "0\n");
    assert_eq!(run(&["PRINT 0 OR 1"]), "1\n");
    assert_eq!(run(&["PRINT 1<2 AND 3<4"]), "1\n");
}

#[test]
fn test_variables_are_case_insensitive() {
    assert_eq!(run(&["abc=3:PRINT ABC*2"]), "6\n");
}

#[test]
fn test_unset_variables() {
    assert_eq!(run(&["PRINT X;\"[\";X$;\"]\""]), "0[]\n");
}

#[test]
fn test_division_by_zero() {
    assert_eq!(run(&["PRINT 1/0"]), "?DIVISION BY ZERO\n");
}

#[test]
fn test_power_of_negative_fraction() {
    assert_eq!(run(&["PRINT (-8)^0.5"]), "?ILLEGAL FUNCTION CALL\n");
}
