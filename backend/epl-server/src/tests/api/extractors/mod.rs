mod current_subject;
