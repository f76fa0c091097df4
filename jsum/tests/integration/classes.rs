use jsum::prelude::*;
use jsum_testhelpers::test;

#[derive(Debug, PartialEq)]
struct Person {
    name: String,
    age: i64,
}

#[derive(Debug, PartialEq)]
struct Employee {
    person: Person,
    position: String,
    salary: f64,
}

impl_jsum_class!(Person { name: String, age: i64 });
impl_jsum_class!(Employee extends person: Person { position: String, salary: f64 });

#[test]
fn subclass_decodes_inherited_fields() {
    let bob: Employee = decode(&value!({
        "name": "Bob",
        "age": "52",
        "position": "Programmer",
        "salary": 60000
    }))
    .unwrap();
    assert_eq!(
        bob,
        Employee {
            person: Person {
                name: "Bob".into(),
                age: 52,
            },
            position: "Programmer".into(),
            salary: 60000.0,
        }
    );
}

#[test]
fn subclass_encodes_flat() {
    let bob = Employee {
        person: Person {
            name: "Bob".into(),
            age: 52,
        },
        position: "Programmer".into(),
        salary: 60000.0,
    };
    assert_eq!(
        bob.to_value(),
        value!({"name": "Bob", "age": 52, "position": "Programmer", "salary": 60000.0})
    );
}

#[test]
fn subclass_field_shadows_base_field() {
    #[derive(Debug, PartialEq)]
    struct Intern {
        person: Person,
        age: u8,
    }

    impl_jsum_class!(Intern extends person: Person { age: u8 });

    let descriptor = Intern::descriptor();
    let names: Vec<_> = descriptor.fields().iter().map(|f| f.name).collect();
    assert_eq!(names, ["age", "name"]);

    let intern: Intern = decode(&value!({"name": "Ann", "age": 19})).unwrap();
    assert_eq!(intern.age, 19);
    assert_eq!(intern.person.name, "Ann");
}

#[test]
fn base_policy_is_inherited() {
    struct Animal {
        name: String,
        legs: u8,
    }

    struct Dog {
        animal: Animal,
        breed: String,
    }

    impl_jsum_class!(Animal { name: String, legs: u8 },
        policy = FieldPolicy::new().key_path("legs", "anatomy.legs"));
    impl_jsum_class!(Dog extends animal: Animal { breed: String },
        policy = FieldPolicy::new().default_value("breed", "mutt"));

    let dog: Dog = decode(&value!({"name": "Rex", "anatomy": {"legs": "4"}})).unwrap();
    assert_eq!(dog.animal.name, "Rex");
    assert_eq!(dog.animal.legs, 4);
    assert_eq!(dog.breed, "mutt");
}

#[test]
fn base_errors_point_at_the_field() {
    let err = decode::<Employee>(&value!({"name": "Bob", "age": {}, "position": "x", "salary": 1}))
        .unwrap_err();
    insta::assert_snapshot!(err, @"at .age: could not decode i64 from object");
}
