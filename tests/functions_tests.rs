//! Integration tests for the function collection and standard library

use lexicalc::{
    Arity, Coercion, DelegatedFunction, Error, ErrorCode, ErrorSeverity, Function,
    FunctionCollection, Tokenizer, Variant,
};

fn eval(name: &str, params: &[Variant]) -> lexicalc::Result<Variant> {
    FunctionCollection::new().evaluate(name, params, &Coercion::new())
}

fn ints(values: &[i32]) -> Vec<Variant> {
    values.iter().map(|v| Variant::Int32(*v)).collect()
}

#[test]
fn test_aggregates() {
    assert_eq!(eval("Min", &ints(&[3, 1, 2])).unwrap(), Variant::Int32(1));
    assert_eq!(eval("Max", &ints(&[3, 1, 2])).unwrap(), Variant::Int32(3));
    assert_eq!(eval("Sum", &ints(&[1, 2, 3])).unwrap(), Variant::Int32(6));
}

#[test]
fn test_aggregates_need_two_parameters() {
    for name in ["Min", "Sum"] {
        let err = eval(name, &ints(&[1])).unwrap_err();
        assert_eq!(err.code(), ErrorCode::WrongParamCount);
        assert_eq!(err.code().to_string(), "WRONG_PARAM_COUNT");
        assert_eq!(err.classify(), ErrorSeverity::Recoverable);
        assert!(err.to_string().contains("expected at least 2, got 1"));
    }
}

#[test]
fn test_calculate_without_parameters() {
    let functions = FunctionCollection::new();
    let ops = Coercion::new();
    for name in ["Sum", "Min", "Abs", "If", "Choose"] {
        let function: std::sync::Arc<dyn Function> = functions.find_by_name(name).unwrap();
        let err = function.calculate(&[], &ops).unwrap_err();
        assert_eq!(err.code(), ErrorCode::WrongParamCount, "{}", name);
    }

    // Every built-in rejects an empty call it cannot take
    for function in functions.get_all() {
        if !function.arity().check(0) {
            assert!(function.calculate(&[], &ops).is_err(), "{}", function.name());
        }
    }
}

#[test]
fn test_choose_and_if() {
    let params = vec![
        Variant::Int32(1),
        Variant::string("a"),
        Variant::string("b"),
        Variant::string("c"),
    ];
    assert_eq!(eval("Choose", &params).unwrap(), Variant::string("b"));

    let params = vec![
        Variant::Boolean(true),
        Variant::string("a"),
        Variant::string("b"),
    ];
    assert_eq!(eval("If", &params).unwrap(), Variant::string("a"));
}

#[test]
fn test_choose_names_required_count() {
    let params = vec![Variant::Int32(3), Variant::string("a"), Variant::string("b")];
    match eval("Choose", &params) {
        Err(Error::WrongParamCount {
            function,
            expected,
            got,
        }) => {
            assert_eq!(function, "Choose");
            assert_eq!(expected, "at least 5");
            assert_eq!(got, 3);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_lookup_is_case_insensitive() {
    let functions = FunctionCollection::new();
    let sum = functions.find_by_name("SUM").unwrap();
    assert_eq!(sum.name(), "Sum");
    assert_eq!(
        functions.find_index_by_name("sum"),
        functions.find_index_by_name("Sum")
    );
    assert!(matches!(
        functions.evaluate("NoSuchFunction", &[], &Coercion::new()),
        Err(Error::UndefinedFunction { .. })
    ));
}

#[test]
fn test_duplicates_resolve_to_first() {
    let mut functions = FunctionCollection::new();
    let index = functions.add_function(DelegatedFunction::new("sum", Arity::Any, |_, _| {
        Ok(Variant::string("shadow"))
    }));
    assert!(functions.find_index_by_name("SUM").unwrap() < index);
    assert_eq!(
        functions
            .evaluate("SUM", &ints(&[1, 2]), &Coercion::new())
            .unwrap(),
        Variant::Int32(3)
    );

    functions.remove_by_name("Sum");
    assert_eq!(
        functions
            .evaluate("SUM", &ints(&[1, 2]), &Coercion::new())
            .unwrap(),
        Variant::string("shadow")
    );
}

#[test]
fn test_tokens_feed_functions() {
    // Arguments taken from a token stream
    let params: Vec<Variant> = Tokenizer::new("4 'x' 2.5")
        .tokenize()
        .unwrap()
        .iter()
        .filter(|t| !t.kind.is_trivia() && !t.is_eof())
        .map(|t| t.to_variant())
        .collect();
    assert_eq!(eval("Sum", &params).unwrap(), Variant::string("4x2.5"));
    assert_eq!(eval("Array", &params).unwrap(), Variant::array(params.clone()));
}

#[test]
fn test_math_and_dates() {
    assert_eq!(eval("Abs", &[Variant::Int64(-9)]).unwrap(), Variant::Int64(9));
    assert_eq!(eval("Sqrt", &[Variant::Int32(25)]).unwrap(), Variant::Float64(5.0));
    assert_eq!(
        eval("Round", &[Variant::Float64(2.5)]).unwrap(),
        Variant::Float64(2.0)
    );

    let date = eval("Date", &ints(&[2024, 6, 2])).unwrap();
    assert_eq!(eval("DayOfWeek", &[date.clone()]).unwrap(), Variant::Int32(0));

    let later = Coercion::new()
        .add(&date, &eval("TimeSpan", &ints(&[25, 0, 0])).unwrap())
        .unwrap();
    assert_eq!(later.to_string(), "2024-06-03T01:00:00");
}

#[test]
fn test_empty_and_contains() {
    assert_eq!(eval("Empty", &[Variant::Null]).unwrap(), Variant::Boolean(true));
    assert_eq!(
        eval("Contains", &[Variant::string("abc"), Variant::string("b")]).unwrap(),
        Variant::Boolean(true)
    );
    assert_eq!(
        eval("Contains", &[Variant::Null, Variant::string("b")]).unwrap(),
        Variant::Boolean(false)
    );
}

#[test]
fn test_constants() {
    assert_eq!(eval("Pi", &[]).unwrap(), Variant::Float64(std::f64::consts::PI));
    assert_eq!(eval("E", &[]).unwrap(), Variant::Float64(std::f64::consts::E));
    assert_eq!(eval("Null", &[]).unwrap(), Variant::Null);
    assert!(matches!(eval("Rnd", &[]).unwrap(), Variant::Float64(_)));
    assert!(eval("Pi", &ints(&[1])).is_err());
}
