//! Three small components driven by tether state: two counters, a two-way
//! bound text field and a contact form. Stdout stands in for the screen.

use tether::{ChangeEvent, ControlledInput, Counter, Form, Signal, dispatch};

fn main() {
    println!("== UseState");
    let count = Counter::<i32>::default();
    let count_by_three = Counter::<i32>::default();
    let _count_view = count.watch(|n| println!("Count : {n}"));
    let _by_three_view = count_by_three.watch(|n| println!("Count By Three : {n}"));

    // "Increment" button.
    count.increment();
    // "IncrementByThree" button: three functional updates in one batch.
    count_by_three.add_repeated(1, 3);
    // The same click written with a captured value only moves by one.
    count_by_three.add_repeated_stale(1, 3);

    println!("\n== Two way binding");
    let input = ControlledInput::default();
    let label = input.label();
    let _view = input.on_render(move |_| println!("{}", label.get()));
    for keystroke in ["H", "Hi"] {
        input.on_change(keystroke);
    }
    assert_eq!(input.displayed(), input.value());

    println!("\n== Multiple state");
    let form = Form::new(["firstName", "lastName", "email"]);
    let summary = form.summary();
    let _paragraph = form.watch(move |ctx| {
        if let Some(event) = ctx.metadata().get::<ChangeEvent>() {
            println!("({} edited)", event.field());
        }
        println!("{}", summary.get());
    });

    let (sender, dispatcher) = dispatch::channel(form);
    for (field, value) in [
        ("firstName", "Ada"),
        ("lastName", "Lovelace"),
        ("email", "ada@example.com"),
        ("phone", "555"),
    ] {
        if let Err(err) = sender.send((field, value)) {
            eprintln!("could not queue edit: {err}");
        }
    }

    let drained = dispatcher.pump();
    for err in &drained.rejected {
        eprintln!("developer error: {err}");
    }
    println!("final record: {:?}", dispatcher.form().record());
}
