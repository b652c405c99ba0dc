mod common;
use common::*;

#[test]
fn test_dim_string_slots() {
    assert_eq!(
        run(&["DIM A$(3):A$(2)=\"X\":PRINT \"[\";A$(1);A$(2);A$(3);\"]\""]),
        "[X]\n"
    );
    assert_eq!(run(&["DIM A$(3):PRINT LEN(A$(3))"]), "0\n");
}

#[test]
fn test_dim_bounds() {
    assert_eq!(run(&["DIM A$(3):A$(4)=\"X\""]), "?SUBSCRIPT OUT OF RANGE\n");
    assert_eq!(run(&["DIM A$(3):PRINT A$(0)"]), "?SUBSCRIPT OUT OF RANGE\n");
}

#[test]
fn test_two_dimensions() {
    assert_eq!(
        run(&["DIM B(2,3):B(2,3)=7:B(1,2)=5:PRINT B(2,3);B(1,2);B(1,1)"]),
        "750\n"
    );
    assert_eq!(run(&["DIM B(2,3):B(3,2)=1"]), "?SUBSCRIPT OUT OF RANGE\n");
}

#[test]
fn test_redim_replaces() {
    assert_eq!(run(&["DIM A(2):A(1)=5:DIM A(4):PRINT A(1);A(4)"]), "00\n");
}

#[test]
fn test_scalar_is_one_by_one() {
    assert_eq!(run(&["A=3:PRINT A(1);A(1,1)"]), "33\n");
    assert_eq!(run(&["PRINT Z(2)"]), "?SUBSCRIPT OUT OF RANGE\n");
    assert_eq!(run(&["Z(2)=1"]), "?SUBSCRIPT OUT OF RANGE\n");
}

#[test]
fn test_subscripts_are_expressions() {
    assert_eq!(
        run(&["DIM A(10):FOR I=1 TO 10:A(I)=I*I:NEXT I:PRINT A(3);\",\";A(2+2*4)"]),
        "9,100\n"
    );
}

#[test]
fn test_array_too_large() {
    assert_eq!(
        run(&["DIM A(2000,2000)"]),
        "?OUT OF MEMORY; ARRAY TOO LARGE\n"
    );
}
