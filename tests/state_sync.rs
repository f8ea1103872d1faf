#![allow(missing_docs)]

use std::{cell::RefCell, rc::Rc};

use tether::*;

fn contact() -> Form {
    Form::new(["firstName", "lastName", "email"])
}

#[test]
fn first_name_edit_leaves_other_fields_empty() {
    let form = contact();
    form.handle_change(ChangeEvent::new("firstName", "Ada"))
        .unwrap();

    let record = form.record();
    assert_eq!(
        record.iter().collect::<Vec<_>>(),
        [("firstName", "Ada"), ("lastName", ""), ("email", "")]
    );
}

fn record_shapes() -> Vec<Record> {
    let edited = Record::initialize(["a", "b", "c"])
        .apply_change(&ChangeEvent::new("b", "two"))
        .unwrap();
    let grown = Record::initialize(["a"])
        .apply_change_with(
            &ChangeEvent::new("extra", "x"),
            config::UnknownFieldPolicy::Insert,
        )
        .unwrap();
    vec![
        Record::initialize(Vec::<String>::new()),
        Record::initialize(["only"]),
        Record::initialize(["a", "b", "a", "c", "b"]),
        edited,
        grown,
    ]
}

#[test]
fn changed_field_takes_new_value_and_others_keep_theirs() {
    for seed in record_shapes() {
        let fields: Vec<String> = seed.fields().map(String::from).collect();
        for field in &fields {
            let next = seed.apply_change(&ChangeEvent::new(field.as_str(), "new")).unwrap();
            assert_eq!(next.get(field), Some("new"), "{seed:?}");
            assert_eq!(next.len(), seed.len());
            for other in fields.iter().filter(|other| *other != field) {
                assert_eq!(next.get(other), seed.get(other), "{seed:?}");
            }
        }
        assert_eq!(
            seed.apply_change(&ChangeEvent::new("undeclared", "x")),
            Err(UnknownFieldError::new("undeclared"))
        );
    }
}

#[test]
fn applying_the_same_change_twice_is_idempotent() {
    for seed in record_shapes() {
        for field in seed.fields() {
            let event = ChangeEvent::new(field, "same");
            let once = seed.apply_change(&event).unwrap();
            assert_eq!(once.apply_change(&event).unwrap(), once);
        }
    }
}

#[test]
fn repeating_an_event_settles_on_its_value() {
    let form = contact();
    let event = ChangeEvent::new("email", "ada@example.com");
    form.handle_change(event.clone()).unwrap();
    let once = form.record();
    form.handle_change(event).unwrap();
    assert_eq!(form.record(), once);
}

#[test]
fn undeclared_field_is_reported_to_the_caller() {
    let form = contact();
    let err = form.change("age", "36").unwrap_err();
    assert_eq!(err.field(), "age");
    assert_eq!(err.to_string(), "field `age` is not declared on this record");
    assert_eq!(Error::from(err.clone()).to_string(), err.to_string());
    assert_eq!(form.record().len(), 3);
}

#[test]
fn three_functional_increments_reach_three() {
    let count = State::new(0);
    count.batch(|| {
        count.update(|n| n + 1);
        count.update(|n| n + 1);
        count.update(|n| n + 1);
    });
    assert_eq!(count.get(), 3);
}

#[test]
fn three_stale_increments_all_resolve_to_one() {
    let count = State::new(0);
    let queued = RefCell::new(Vec::new());
    count.batch(|| {
        for _ in 0..3 {
            let next = count.get() + 1;
            queued.borrow_mut().push(next);
            count.set(next);
        }
    });
    assert_eq!(*queued.borrow(), [1, 1, 1]);
    assert_eq!(count.get(), 1);
}

#[test]
fn two_way_binding_view_matches_state_immediately() {
    let input = ControlledInput::new("");
    input.on_change("Hi");
    assert_eq!(input.displayed(), "Hi");
    assert_eq!(input.displayed(), input.value());
}

#[test]
fn batched_form_edits_render_once() {
    let form = contact();
    let frames = Rc::new(RefCell::new(Vec::new()));
    let _render = {
        let frames = frames.clone();
        form.watch(move |ctx| {
            let flushed = ctx.metadata().get::<Flushed>().map(|f| f.updates);
            frames.borrow_mut().push((ctx.value().to_string(), flushed));
        })
    };

    form.batch(|| {
        form.change("firstName", "Ada").unwrap();
        form.change("lastName", "Lovelace").unwrap();
        form.change("firstName", "Augusta").unwrap();
        assert_eq!(form.value("firstName").as_deref(), Some(""));
    });

    assert_eq!(
        *frames.borrow(),
        [(
            "firstName: Augusta lastName: Lovelace email: ".to_string(),
            Some(3)
        )]
    );
}

#[test]
fn changes_stream_follows_a_field() {
    use futures_core::Stream;
    use std::{
        pin::pin,
        task::{Context, Poll, Waker},
    };

    let form = contact();
    let email = form.field("email").unwrap();
    let mut changes = pin!(email.changes());
    let mut cx = Context::from_waker(Waker::noop());

    form.change("email", "a@example.com").unwrap();
    email.set("ada@example.com".into());

    assert_eq!(
        changes.as_mut().poll_next(&mut cx),
        Poll::Ready(Some("a@example.com".to_string()))
    );
    assert_eq!(
        changes.as_mut().poll_next(&mut cx),
        Poll::Ready(Some("ada@example.com".to_string()))
    );
    assert_eq!(changes.as_mut().poll_next(&mut cx), Poll::Pending);
}
