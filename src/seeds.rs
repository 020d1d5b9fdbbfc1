//! Built-in catalog so the app is usable without a CATALOG_PATH.

use crate::config::Catalog;
use crate::domain::{Assignment, AssignmentPicture, Picture};

pub fn seed_catalog() -> Catalog {
  let pictures = vec![
    Picture { id: 1, image: "assignment_images/cat.jpg".into() },
    Picture { id: 2, image: "assignment_images/dog.jpg".into() },
    Picture { id: 3, image: "assignment_images/owl.jpg".into() },
  ];

  let assignments = vec![
    Assignment {
      id: 1,
      name: "Name the animal".into(),
      help: "Choose a picture and write a short story about it. Use the name of the animal.".into(),
      story_min_length: 50,
      story_max_length: 500,
    },
    Assignment {
      id: 2,
      name: "Night animals".into(),
      help: "Write about an animal that is awake at night.".into(),
      story_min_length: 30,
      story_max_length: 300,
    },
  ];

  let assignment_pictures = vec![
    AssignmentPicture { id: 1, assignment: 1, picture: 1, keywords: "cat, kitten, cats".into() },
    AssignmentPicture { id: 2, assignment: 1, picture: 2, keywords: "dog, puppy, dogs".into() },
    AssignmentPicture { id: 3, assignment: 1, picture: 3, keywords: "owl, owls".into() },
    AssignmentPicture { id: 4, assignment: 2, picture: 3, keywords: "owl, owls, night".into() },
  ];

  Catalog { assignments, pictures, assignment_pictures }
}
